use bevy::prelude::*;

pub mod actors;
pub mod config;
pub mod feedback;
pub mod game_params;
pub mod ghost;
pub mod physics;
pub mod pool;
pub mod runner;
pub mod session;
pub mod sim_clock;
pub mod sim_rng;
pub mod simulation_sets;
pub mod spawner;
pub mod sync_buffer;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

use physics::integrate_bodies;
use session::{handle_restart, run_is_active};
use sim_clock::{sync_fixed_timestep, tick_sim_clock, SimClock};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Enforce deterministic phase ordering within FixedUpdate
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<SimClock>()
            .add_systems(Startup, actors::spawn_actors)
            .add_systems(Update, sync_fixed_timestep)
            .add_systems(
                FixedUpdate,
                tick_sim_clock
                    .after(handle_restart)
                    .in_set(SimulationSet::PreSim)
                    .run_if(run_is_active),
            )
            .add_systems(
                FixedUpdate,
                integrate_bodies
                    .in_set(SimulationSet::Simulation)
                    .run_if(run_is_active),
            );

        app.add_plugins((
            sim_rng::SimRngPlugin,
            sync_buffer::SyncBufferPlugin,
            session::SessionPlugin,
            spawner::SpawnerPlugin,
            runner::RunnerPlugin,
            ghost::GhostPlugin,
            feedback::FeedbackPlugin,
        ));
    }
}
