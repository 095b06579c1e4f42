//! Headless ghost run.
//!
//! Runs the simulation on a fixed loop with a simple autopilot at the
//! controls, logging the runner and its ghost once per simulated second.
//!
//! Environment:
//!   - `GHOSTRUN_PARAMS`: path to a JSON `GameParams` file (defaults otherwise)
//!   - `GHOSTRUN_SECONDS`: wall-clock seconds to run before exiting (default 30)

use std::path::PathBuf;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::actors::{GhostRunner, Runner};
use simulation::game_params::GameParams;
use simulation::ghost::ReplayStats;
use simulation::pool::{Partition, PooledKind, PooledObject, Released};
use simulation::runner::PlayerInput;
use simulation::session::{handle_restart, RestartRun, RunSession};
use simulation::sim_clock::SimClock;
use simulation::sync_buffer::HistoryStore;
use simulation::SimulationSet;

const DEFAULT_RUN_SECONDS: f64 = 30.0;

/// How far ahead the autopilot looks for orbs to steer toward.
const ORB_LOOKAHEAD: f32 = 8.0;
/// Obstacles closer than this (in z) and roughly in lane trigger a jump.
const JUMP_WINDOW: (f32, f32) = (0.6, 1.6);

#[derive(Resource)]
struct RunLimit {
    seconds: f64,
    runs: u32,
}

fn main() {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 120.0,
        ))),
    )
    .add_plugins(LogPlugin::default());

    let params = match std::env::var_os("GHOSTRUN_PARAMS") {
        Some(path) => GameParams::load_or_default(&PathBuf::from(path)),
        None => GameParams::default(),
    };
    let seconds = match std::env::var("GHOSTRUN_SECONDS") {
        Ok(raw) => raw.parse::<f64>().unwrap_or_else(|e| {
            warn!("GHOSTRUN_SECONDS={raw:?} is not a number ({e}), using {DEFAULT_RUN_SECONDS}");
            DEFAULT_RUN_SECONDS
        }),
        Err(_) => DEFAULT_RUN_SECONDS,
    };
    info!(
        "ghostrun: tick {:.3}s, ghost lag {:.3}s, seed {}, running for {:.0}s",
        params.tick_seconds, params.ghost.lag_seconds, params.seed, seconds
    );

    app.insert_resource(params)
        .insert_resource(RunLimit { seconds, runs: 1 })
        .add_plugins(simulation::SimulationPlugin)
        .add_systems(
            FixedUpdate,
            (
                restart_after_game_over.before(handle_restart),
                autopilot.after(handle_restart),
            )
                .in_set(SimulationSet::PreSim),
        )
        .add_systems(FixedUpdate, report.in_set(SimulationSet::PostSim))
        .add_systems(Update, exit_when_done);

    app.run();
}

/// Steer toward the nearest orb ahead and hop over obstacles in lane.
fn autopilot(
    session: Res<RunSession>,
    mut input: ResMut<PlayerInput>,
    runner: Query<&Transform, With<Runner>>,
    objects: Query<(&Transform, &PooledObject, &Partition), Without<Released>>,
) {
    if !session.is_running() {
        return;
    }
    let Ok(runner) = runner.get_single() else {
        return;
    };
    let me = runner.translation;

    let ahead = objects
        .iter()
        .filter(|(_, _, partition)| **partition == Partition::Live)
        .map(|(transform, object, _)| (transform.translation - me, object.kind))
        .filter(|(offset, _)| offset.z > 0.0);

    let mut nearest_orb: Option<Vec3> = None;
    let mut jump = false;
    for (offset, kind) in ahead {
        match kind {
            PooledKind::Orb if offset.z < ORB_LOOKAHEAD => {
                if nearest_orb.map_or(true, |best| offset.z < best.z) {
                    nearest_orb = Some(offset);
                }
            }
            PooledKind::Obstacle => {
                if offset.z > JUMP_WINDOW.0 && offset.z < JUMP_WINDOW.1 && offset.x.abs() < 1.0 {
                    jump = true;
                }
            }
            _ => {}
        }
    }

    let steer = nearest_orb.map_or(0.0, |orb| orb.x);
    input.left = steer < -0.1;
    input.right = steer > 0.1;
    if jump {
        input.request_jump();
    }
}

/// Once per simulated second, log where the runner and the ghost are.
#[allow(clippy::too_many_arguments)]
fn report(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    session: Res<RunSession>,
    store: Res<HistoryStore>,
    stats: Res<ReplayStats>,
    runner: Query<&Transform, With<Runner>>,
    ghost: Query<&Transform, With<GhostRunner>>,
) {
    let per_second = (1.0 / params.tick_seconds).round().max(1.0) as u64;
    if clock.tick == 0 || clock.tick % per_second != 0 {
        return;
    }
    let (Ok(runner), Ok(ghost)) = (runner.get_single(), ghost.get_single()) else {
        return;
    };
    info!(
        "t={:>6.2}s runner x={:+.2} y={:.2} | ghost x={:+.2} y={:.2} | score {} | pending {} | replayed {} (dangling {})",
        clock.now(),
        runner.translation.x,
        runner.translation.y,
        ghost.translation.x,
        ghost.translation.y,
        session.display_score(),
        store.pending_events(),
        stats.events_applied,
        stats.dangling_targets,
    );
}

fn restart_after_game_over(
    session: Res<RunSession>,
    mut limit: ResMut<RunLimit>,
    mut restarts: EventWriter<RestartRun>,
) {
    if session.is_running() {
        return;
    }
    limit.runs += 1;
    info!("starting run {}", limit.runs);
    restarts.send(RestartRun);
}

fn exit_when_done(
    time: Res<Time<Real>>,
    limit: Res<RunLimit>,
    session: Res<RunSession>,
    mut exit: EventWriter<AppExit>,
) {
    if time.elapsed_secs_f64() >= limit.seconds {
        info!(
            "ghostrun finished after {} run(s), last score {}",
            limit.runs,
            session.display_score()
        );
        exit.send(AppExit::Success);
    }
}
