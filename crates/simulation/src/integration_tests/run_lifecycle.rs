use bevy::prelude::Transform;

use crate::physics::rest_height;
use crate::pool::{Partition, PooledKind};
use crate::session::{PendingHit, RunPhase};
use crate::test_harness::TestRun;

#[test]
fn obstacle_hit_ends_the_run_after_the_hit_effect() {
    let mut run = TestRun::quarter_second_lag();
    let id = run.place_pair_on_start_line(PooledKind::Obstacle);

    run.tick(1);
    // Hit at t = 0.0625; effect lasts 0.2 s.
    assert!(run.runner_glow().is_lit(PooledKind::Obstacle));
    run.assert_active(Partition::Live, id, true);
    assert!(run.session().game_over_at.is_some());

    run.tick(3);
    run.assert_phase(RunPhase::Running);

    run.tick(1);
    run.assert_phase(RunPhase::GameOver);
    run.assert_active(Partition::Live, id, false);
    assert_eq!(run.store().stats().events_recorded, 1);
}

#[test]
fn game_over_freezes_the_world() {
    let mut run = TestRun::quarter_second_lag();
    run.place_pair_on_start_line(PooledKind::Obstacle);
    run.tick(5);
    run.assert_phase(RunPhase::GameOver);

    let now = run.now();
    let score = run.session().score;
    let snapshots = run.store().stats().snapshots_recorded;
    run.hold_right();
    run.tick(20);

    assert_eq!(run.now(), now);
    assert_eq!(run.session().score, score);
    assert_eq!(run.store().stats().snapshots_recorded, snapshots);
    assert_eq!(run.runner_x(), 0.0);
}

#[test]
fn restart_resets_history_and_objects() {
    let mut run = TestRun::quarter_second_lag();
    run.place_pair_on_start_line(PooledKind::Obstacle);
    let far = run.place_pair_far_ahead(PooledKind::Orb, 1.0);
    run.tick(5);
    run.assert_phase(RunPhase::GameOver);

    run.restart();
    run.tick(1);

    run.assert_phase(RunPhase::Running);
    assert_eq!(run.now(), 0.0625);
    assert_eq!(run.store().snapshot_count(), 1);
    assert_eq!(run.store().pending_events(), 0);
    assert_eq!(run.replay_stats().events_applied, 0);
    assert_eq!(run.active_objects(Partition::Live), 0);
    assert_eq!(run.active_objects(Partition::Ghost), 0);
    run.assert_active(Partition::Ghost, far, false);
    assert!(run.session().score < 1.0);
    assert!(!run.runner_glow().is_lit(PooledKind::Obstacle));
}

#[test]
fn restart_discards_unreplayed_actions() {
    let mut run = TestRun::quarter_second_lag();
    run.press_jump();
    run.tick(2);
    assert_eq!(run.store().pending_events(), 1);

    run.restart();
    let mut highest = 0.0_f32;
    for _ in 0..10 {
        run.tick(1);
        highest = highest.max(run.ghost_position().y);
    }
    assert_eq!(highest, rest_height());
    assert_eq!(run.replay_stats().events_applied, 0);
}

#[test]
fn restart_puts_both_actors_on_the_start_line() {
    let mut run = TestRun::quarter_second_lag();
    run.hold_right();
    run.press_jump();
    run.tick(12);
    run.release_keys();

    run.restart();
    run.tick(1);
    assert_eq!(run.runner_position().x, 0.0);
    assert_eq!(run.runner_position().y, rest_height());
    assert_eq!(run.ghost_position().x, 0.0);
}

#[test]
fn score_grows_while_running() {
    let mut run = TestRun::quiet();
    run.tick(100);
    // 100 ticks of 0.02 s at 0.5 points per second.
    let score = run.session().score;
    assert!((score - 1.0).abs() < 1e-3, "score was {score}");
    assert!(run.session().object_speed > 1.9);
}

#[test]
fn hit_obstacle_recycled_early_drops_its_pending_hit() {
    let mut run = TestRun::quarter_second_lag();
    let id = run.place_pair_on_start_line(PooledKind::Obstacle);
    let live = run.object(Partition::Live, id).expect("live copy placed");

    run.tick(1);
    assert!(run.world_mut().get::<PendingHit>(live).is_some());

    // Carry it past the despawn line before the hit effect ends.
    if let Some(mut transform) = run.world_mut().get_mut::<Transform>(live) {
        transform.translation.z = -10.0;
    }
    run.tick(1);

    assert!(run.is_released(live));
    assert!(run.world_mut().get::<PendingHit>(live).is_none());
    run.assert_phase(RunPhase::Running);

    // The hit still ends the run on schedule.
    run.tick(3);
    run.assert_phase(RunPhase::GameOver);
}
