use bevy::prelude::*;

use crate::physics::integrate_bodies;
use crate::runner::drive_runner;
use crate::session::run_is_active;
use crate::SimulationSet;

use super::replay::{replay_ghost, GhostEventApplied, ReplayStats};

/// Registers the ghost replay system and its applied-event hook.
///
/// Replay runs in `Simulation` after the runner has recorded this tick's jump
/// and before physics integration, so a replayed impulse is integrated on the
/// tick it is applied, as it was for the runner.
pub struct GhostPlugin;

impl Plugin for GhostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ReplayStats>()
            .add_event::<GhostEventApplied>()
            .add_systems(
                FixedUpdate,
                replay_ghost
                    .after(drive_runner)
                    .before(integrate_bodies)
                    .in_set(SimulationSet::Simulation)
                    .run_if(run_is_active),
            );
    }
}
