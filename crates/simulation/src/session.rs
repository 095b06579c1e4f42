//! Run lifecycle: score, object speed, the obstacle-hit → game-over delay and
//! restarts.
//!
//! A restart re-initialises everything a run owns, including the history
//! store, so the ghost never replays actions from a previous run.

use bevy::prelude::*;

use crate::actors::{reset_actor, GhostRunner, Runner};
use crate::feedback::{glow_on_ghost_replay, CollisionGlow};
use crate::game_params::GameParams;
use crate::ghost::ReplayStats;
use crate::physics::Body;
use crate::pool::{Partition, PoolAccess, PooledObject, Released};
use crate::runner::record_runner_snapshot;
use crate::sim_clock::SimClock;
use crate::spawner::SpawnState;
use crate::sync_buffer::HistoryStore;
use crate::SimulationSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunPhase {
    #[default]
    Running,
    GameOver,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RunSession {
    pub phase: RunPhase,
    pub score: f32,
    /// Drift speed handed to newly spawned objects; grows with survival time.
    pub object_speed: f32,
    /// Clock time at which a pending obstacle hit ends the run.
    pub game_over_at: Option<f32>,
}

impl RunSession {
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points as f32;
    }

    /// Keep the earliest pending game-over time.
    pub fn schedule_game_over(&mut self, at: f32) {
        self.game_over_at = Some(self.game_over_at.map_or(at, |t| t.min(at)));
    }

    pub fn display_score(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }
}

/// An obstacle the runner hit; it stays in place until its hit effect ends.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingHit {
    pub release_at: f32,
}

/// Request a fresh run.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartRun;

pub fn run_is_active(session: Res<RunSession>) -> bool {
    session.is_running()
}

pub fn accumulate_run(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut session: ResMut<RunSession>,
) {
    let dt = clock.delta();
    session.score += params.feedback.score_rate * dt;
    session.object_speed += dt;
}

/// Release hit obstacles whose effect has finished and end the run when due.
pub fn resolve_pending_hits(
    clock: Res<SimClock>,
    mut session: ResMut<RunSession>,
    hits: Query<(Entity, &PendingHit, &PooledObject, &Partition)>,
    mut access: PoolAccess,
) {
    let now = clock.now();
    for (entity, hit, object, partition) in &hits {
        if now >= hit.release_at {
            access.release(entity, *partition, object);
        }
    }

    if session.game_over_at.is_some_and(|at| now >= at) {
        session.game_over_at = None;
        session.phase = RunPhase::GameOver;
        info!(
            "Run over at {:.2}s with score {}",
            now,
            session.display_score()
        );
    }
}

/// Reset run-owned state when a [`RestartRun`] arrives.
#[allow(clippy::too_many_arguments)]
pub fn handle_restart(
    mut restarts: EventReader<RestartRun>,
    mut session: ResMut<RunSession>,
    mut clock: ResMut<SimClock>,
    mut store: ResMut<HistoryStore>,
    mut stats: ResMut<ReplayStats>,
    mut spawn_state: ResMut<SpawnState>,
    objects: Query<(Entity, &PooledObject, &Partition), Without<Released>>,
    mut actors: Query<
        (&mut Transform, &mut Body, &mut CollisionGlow),
        Or<(With<Runner>, With<GhostRunner>)>,
    >,
    mut access: PoolAccess,
) {
    if restarts.read().count() == 0 {
        return;
    }

    for (entity, object, partition) in &objects {
        access.release(entity, *partition, object);
    }
    for (mut transform, mut body, mut glow) in &mut actors {
        reset_actor(&mut transform, &mut body, &mut glow);
    }

    store.reset();
    stats.reset();
    clock.reset();
    spawn_state.reset();
    *session = RunSession::default();
    info!("Run restarted");
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunSession>()
            .add_event::<RestartRun>()
            .add_systems(FixedUpdate, handle_restart.in_set(SimulationSet::PreSim))
            .add_systems(
                FixedUpdate,
                (accumulate_run, resolve_pending_hits)
                    .chain()
                    .after(record_runner_snapshot)
                    .after(glow_on_ghost_replay)
                    .in_set(SimulationSet::PostSim)
                    .run_if(run_is_active),
            );
    }
}
