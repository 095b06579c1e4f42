use bevy::prelude::*;

use crate::game_params::GameParams;

/// How far a lag may sit from a whole number of ticks and still be treated as one.
const WHOLE_TICK_TOLERANCE: f32 = 1e-3;

/// Fixed-step simulation clock.
///
/// Time is derived from the tick count rather than accumulated, so the value
/// recorded by the runner at tick `n` is exactly the value the ghost compares
/// against at tick `n`, with no drift between them.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimClock {
    pub tick: u64,
    pub tick_seconds: f32,
}

impl SimClock {
    /// Seconds elapsed at the current tick.
    pub fn now(&self) -> f32 {
        self.tick as f32 * self.tick_seconds
    }

    /// Clock time `lag_seconds` before now.
    ///
    /// A lag that is a whole number of ticks resolves to the exact time the
    /// clock reported at that earlier tick, so delayed lookups compare equal to
    /// the timestamps recorded back then.
    pub fn time_before(&self, lag_seconds: f32) -> f32 {
        if self.tick_seconds > 0.0 {
            let lag_ticks = lag_seconds / self.tick_seconds;
            let whole = lag_ticks.round();
            if (lag_ticks - whole).abs() <= WHOLE_TICK_TOLERANCE {
                let tick = self.tick as i64 - whole as i64;
                return tick as f32 * self.tick_seconds;
            }
        }
        self.now() - lag_seconds
    }

    /// Duration of one tick.
    pub fn delta(&self) -> f32 {
        self.tick_seconds
    }

    pub fn advance(&mut self, tick_seconds: f32) {
        self.tick_seconds = tick_seconds;
        self.tick += 1;
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }
}

pub fn tick_sim_clock(params: Res<GameParams>, mut clock: ResMut<SimClock>) {
    clock.advance(params.tick_seconds);
}

/// Keeps Bevy's fixed timestep in step with `GameParams::tick_seconds`.
pub fn sync_fixed_timestep(params: Res<GameParams>, time: Option<ResMut<Time<Fixed>>>) {
    let Some(mut time) = time else {
        return;
    };
    if !params.is_changed() || params.tick_seconds <= 0.0 {
        return;
    }
    time.set_timestep_seconds(params.tick_seconds as f64);
}
