//! Integration tests using the `TestRun` harness.
//!
//! Each test spins up a headless Bevy App with `SimulationPlugin` and checks
//! how the runner, history store and ghost replay behave together.

mod event_replay;
mod ghost_tracking;
mod replay_delay;
mod run_lifecycle;
mod spawning;
