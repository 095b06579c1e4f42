//! Deterministic simulation RNG resource.
//!
//! Wraps `ChaCha8Rng` for cross-platform deterministic randomness. Spawn
//! placement draws from `ResMut<SimRng>` so identical seeds produce identical
//! runs.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::game_params::GameParams;

/// Deterministic RNG resource for all simulation randomness.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl FromWorld for SimRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<GameParams>()
            .map(|p| p.seed)
            .unwrap_or_else(|| GameParams::default().seed);
        Self::from_seed_u64(seed)
    }
}

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameParams>();
        app.init_resource::<SimRng>();
    }
}
