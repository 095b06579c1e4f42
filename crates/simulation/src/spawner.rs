//! Paired obstacle/orb spawning.
//!
//! Every spawn gets a fresh id and exists twice: once in the live partition for
//! the runner and once in the ghost partition for the replay. Both copies start
//! at the same position and speed. The ghost never collides with its copy; the
//! copy goes away when the runner's contact with the live one is replayed.

use bevy::prelude::*;
use rand::Rng;

use crate::game_params::{GameParams, SpawnParams};
use crate::pool::{
    drift_objects, ObjectPool, Partition, PartitionIndex, PoolAccess, PooledKind, PooledObject,
};
use crate::session::{run_is_active, RunSession};
use crate::sim_clock::{tick_sim_clock, SimClock};
use crate::sim_rng::SimRng;
use crate::SimulationSet;

/// Hands out spawn ids. Id 0 is reserved for "no target".
#[derive(Resource, Debug, Clone)]
pub struct IdGenerator {
    next: u32,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.checked_add(1).unwrap_or(1);
        id
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnState {
    pub obstacle_timer: f32,
    pub orb_timer: f32,
    pub last_obstacle_x: Option<f32>,
    pub last_orb_x: Option<f32>,
}

impl SpawnState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Pick an x in `-range..=range` at least `min_separation` away from
/// `forbidden`, falling back to a clamped offset after `max_attempts` misses.
pub fn safe_x(rng: &mut impl Rng, spawn: &SpawnParams, forbidden: Option<f32>) -> f32 {
    let range = spawn.range_x.abs();
    let Some(forbidden) = forbidden else {
        return rng.gen_range(-range..=range);
    };
    for _ in 0..spawn.max_attempts {
        let candidate = rng.gen_range(-range..=range);
        if (candidate - forbidden).abs() >= spawn.min_separation {
            return candidate;
        }
    }
    (forbidden + spawn.min_separation).clamp(-range, range)
}

/// Place the live and ghost copies of one new object.
pub fn spawn_pair(
    access: &mut PoolAccess,
    id: u32,
    kind: PooledKind,
    x: f32,
    speed: f32,
    spawn_z: f32,
) -> (Entity, Entity) {
    let position = Vec3::new(x, 0.0, spawn_z);
    let object = PooledObject { id, kind, speed };
    let live = access.acquire(Partition::Live, object.clone(), position);
    let ghost = access.acquire(Partition::Ghost, object, position);
    (live, ghost)
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_objects(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut state: ResMut<SpawnState>,
    mut ids: ResMut<IdGenerator>,
    mut rng: ResMut<SimRng>,
    mut session: ResMut<RunSession>,
    mut access: PoolAccess,
) {
    let spawn = &params.spawn;
    if !spawn.enabled {
        return;
    }
    let dt = clock.delta();
    state.obstacle_timer += dt;
    state.orb_timer += dt;

    let mut due = Vec::with_capacity(2);
    if state.obstacle_timer >= spawn.obstacle_interval {
        state.obstacle_timer = 0.0;
        due.push(PooledKind::Obstacle);
    }
    if state.orb_timer >= spawn.orb_interval {
        state.orb_timer = 0.0;
        due.push(PooledKind::Orb);
    }

    for kind in due {
        let x = match kind {
            PooledKind::Obstacle => {
                let x = safe_x(&mut rng.0, spawn, state.last_orb_x);
                state.last_obstacle_x = Some(x);
                x
            }
            PooledKind::Orb => {
                let x = safe_x(&mut rng.0, spawn, state.last_obstacle_x);
                state.last_orb_x = Some(x);
                x
            }
        };
        if session.object_speed < spawn.start_speed {
            session.object_speed = spawn.start_speed;
        }
        let id = ids.next_id();
        spawn_pair(&mut access, id, kind, x, session.object_speed, spawn.spawn_z);
        debug!("spawned {} pair {} at x={:.2}", kind.name(), id, x);
    }
}

pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObjectPool>()
            .init_resource::<PartitionIndex>()
            .init_resource::<IdGenerator>()
            .init_resource::<SpawnState>()
            .add_systems(
                FixedUpdate,
                (spawn_objects, drift_objects)
                    .chain()
                    .after(tick_sim_clock)
                    .in_set(SimulationSet::PreSim)
                    .run_if(run_is_active),
            );
    }
}
