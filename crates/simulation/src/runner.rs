//! Live runner: the producer side of the ghost history.
//!
//! Each tick the runner turns [`PlayerInput`] into horizontal velocity and
//! grounded jumps, then (after physics) is clamped to its lane and has its
//! pose recorded. Jumps and contacts with live-side objects are recorded as
//! [`PlayerEvent`]s at the tick they happen.

use bevy::prelude::*;

use crate::actors::Runner;
use crate::config::{ACTOR_HALF_EXTENT, OBJECT_HALF_EXTENT};
use crate::feedback::LiveContact;
use crate::game_params::GameParams;
use crate::physics::{integrate_bodies, is_grounded, Body};
use crate::pool::{Partition, PoolAccess, PooledKind, PooledObject, Released};
use crate::session::{run_is_active, PendingHit, RunSession};
use crate::sim_clock::SimClock;
use crate::sync_buffer::{HistoryStore, PlayerEvent};
use crate::SimulationSet;

/// Runner controls for the current tick. Input devices write this; the
/// simulation only reads it.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    /// One-shot: cleared at the end of every tick whether or not the jump fired.
    pub jump: bool,
}

impl PlayerInput {
    /// -1 for left, +1 for right, 0 for neither. Left wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    pub fn request_jump(&mut self) {
        self.jump = true;
    }
}

/// Axis-aligned overlap between the runner box and a pooled object box.
pub fn overlaps(runner: Vec3, object: Vec3) -> bool {
    let reach = ACTOR_HALF_EXTENT + OBJECT_HALF_EXTENT;
    let d = (runner - object).abs();
    d.x < reach && d.y < reach && d.z < reach
}

pub fn drive_runner(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut input: ResMut<PlayerInput>,
    mut store: ResMut<HistoryStore>,
    mut runner: Query<(&Transform, &mut Body), With<Runner>>,
) {
    let jump_requested = std::mem::take(&mut input.jump);
    let Ok((transform, mut body)) = runner.get_single_mut() else {
        return;
    };

    body.velocity.x = input.direction() * params.runner.horizontal_speed;

    if jump_requested && is_grounded(transform.translation.y, params.runner.floor_detection) {
        body.apply_impulse(Vec3::Y * params.runner.jump_force);
        store.record_event(PlayerEvent::jump(clock.now()));
    }
}

pub fn clamp_runner(params: Res<GameParams>, mut runner: Query<&mut Transform, With<Runner>>) {
    let range = params.runner.clamp_range;
    for mut transform in &mut runner {
        transform.translation.x = transform.translation.x.clamp(-range, range);
    }
}

/// Contacts between the runner and live-side objects. Orbs are collected
/// immediately; an obstacle is flagged with a [`PendingHit`] and released
/// when the hit effect finishes.
#[allow(clippy::too_many_arguments)]
pub fn detect_live_contacts(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut store: ResMut<HistoryStore>,
    mut session: ResMut<RunSession>,
    runner: Query<&Transform, With<Runner>>,
    objects: Query<
        (Entity, &Transform, &PooledObject, &Partition),
        (Without<Released>, Without<PendingHit>, Without<Runner>),
    >,
    mut access: PoolAccess,
    mut contacts: EventWriter<LiveContact>,
) {
    let Ok(runner) = runner.get_single() else {
        return;
    };
    let now = clock.now();

    for (entity, transform, object, partition) in &objects {
        if *partition != Partition::Live || !overlaps(runner.translation, transform.translation) {
            continue;
        }
        match object.kind {
            PooledKind::Orb => {
                store.record_event(PlayerEvent::collect_orb(now, object.id));
                session.add_points(params.feedback.orb_points);
                access.release(entity, *partition, object);
            }
            PooledKind::Obstacle => {
                store.record_event(PlayerEvent::hit_obstacle(now, object.id));
                let release_at = now + params.feedback.hit_effect_seconds;
                access.commands.entity(entity).insert(PendingHit { release_at });
                session.schedule_game_over(release_at);
            }
        }
        contacts.send(LiveContact {
            kind: object.kind,
            target_id: object.id,
        });
    }
}

/// Record the runner's post-physics pose for this tick.
pub fn record_runner_snapshot(
    clock: Res<SimClock>,
    mut store: ResMut<HistoryStore>,
    runner: Query<&Transform, With<Runner>>,
) {
    if let Ok(transform) = runner.get_single() {
        store.record_snapshot(clock.now(), transform.translation);
    }
}

pub struct RunnerPlugin;

impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>();
        app.add_systems(
            FixedUpdate,
            (
                drive_runner.before(integrate_bodies),
                clamp_runner.after(integrate_bodies),
                detect_live_contacts.after(clamp_runner),
            )
                .in_set(SimulationSet::Simulation)
                .run_if(run_is_active),
        );
        app.add_systems(
            FixedUpdate,
            record_runner_snapshot
                .in_set(SimulationSet::PostSim)
                .run_if(run_is_active),
        );
    }
}
