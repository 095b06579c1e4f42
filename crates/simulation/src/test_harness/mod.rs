//! # TestRun: headless harness for ghost replay scenarios
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `SimulationPlugin` and
//! drives the `FixedUpdate` schedule directly, one simulation tick per call.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::SimulationPlugin;

/// A headless run of the game for integration tests.
///
/// Build one with a constructor, drive it with [`TestRun::tick`] and inspect
/// the ECS state through the query helpers.
pub struct TestRun {
    app: App,
}

impl TestRun {
    /// Default parameters, spawning enabled.
    pub fn new() -> Self {
        Self::with_params(GameParams::default())
    }

    /// A run with the given parameters. They are inserted before the plugin
    /// is added so every plugin sees them during `build`.
    pub fn with_params(params: GameParams) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(params);
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems spawn the actors.
        app.update();

        Self { app }
    }

    /// Default parameters with spawning switched off, so only objects placed
    /// by the test exist.
    pub fn quiet() -> Self {
        Self::quiet_with(|_| {})
    }

    /// Like [`TestRun::quiet`], with a hook to adjust the parameters first.
    pub fn quiet_with(configure: impl FnOnce(&mut GameParams)) -> Self {
        let mut params = GameParams::default();
        params.spawn.enabled = false;
        configure(&mut params);
        Self::with_params(params)
    }

    /// Quiet run on a 16 Hz tick with a 0.25 s lag: four ticks of delay, and
    /// every tick time is exact in binary floating point.
    pub fn quarter_second_lag() -> Self {
        Self::quiet_with(|p| {
            p.tick_seconds = 0.0625;
            p.ghost.lag_seconds = 0.25;
        })
    }
}

impl Default for TestRun {
    fn default() -> Self {
        Self::new()
    }
}
