use crate::physics::rest_height;
use crate::sync_buffer::ActionKind;
use crate::test_harness::TestRun;

#[test]
fn jump_is_replayed_exactly_one_lag_later() {
    let mut run = TestRun::quarter_second_lag();
    run.press_jump();
    run.tick(1);

    // Recorded at tick 1 (t = 0.0625), due at t = 0.3125 = tick 5.
    assert_eq!(run.store().pending_events(), 1);
    assert!(run.runner_position().y > rest_height());

    run.tick(3);
    assert_eq!(run.now(), 0.25);
    assert_eq!(run.replay_stats().events_applied, 0);
    run.assert_ghost_at_rest();

    run.tick(1);
    assert_eq!(run.now(), 0.3125);
    assert_eq!(run.replay_stats().events_applied, 1);
    assert_eq!(run.store().pending_events(), 0);
    assert!(run.ghost_body().velocity.y > 0.0);
    assert!(run.ghost_position().y > rest_height());
}

#[test]
fn replayed_jump_carries_its_record_time() {
    let mut run = TestRun::quarter_second_lag();
    run.tick(2);
    run.press_jump();
    run.tick(8);

    let replayed = run.replayed_events();
    assert_eq!(replayed.len(), 1);
    assert_eq!(replayed[0].kind, ActionKind::Jump);
    assert_eq!(replayed[0].time, 0.1875);
    assert_eq!(run.replay_stats().last_applied_at, Some(0.4375));
}

#[test]
fn ghost_jump_arc_matches_runner_arc() {
    let mut run = TestRun::quarter_second_lag();
    run.press_jump();

    let mut runner_heights = Vec::new();
    let mut ghost_heights = Vec::new();
    for _ in 0..8 {
        run.tick(1);
        runner_heights.push(run.runner_position().y);
        ghost_heights.push(run.ghost_position().y);
    }

    // The runner jumped on tick 1 and the ghost on tick 5, from the same
    // standing start with the same impulse.
    assert_eq!(&ghost_heights[4..8], &runner_heights[0..4]);
}

#[test]
fn zero_lag_replays_on_the_same_tick() {
    let mut run = TestRun::quiet_with(|p| {
        p.tick_seconds = 0.0625;
        p.ghost.lag_seconds = 0.0;
    });
    run.press_jump();
    run.tick(1);
    assert_eq!(run.replay_stats().events_applied, 1);
    assert_eq!(run.ghost_position().y, run.runner_position().y);
}

#[test]
fn default_sizing_replays_every_jump_ten_ticks_later() {
    let lag_ticks = {
        let params = TestRun::quiet().params().clone();
        (params.ghost.lag_seconds / params.tick_seconds).round() as u32
    };
    assert_eq!(lag_ticks, 10);

    for record_tick in 1..=60u32 {
        let mut run = TestRun::quiet();
        run.tick(record_tick - 1);
        run.press_jump();
        run.tick(1);
        assert_eq!(run.store().stats().events_recorded, 1);

        run.tick(lag_ticks - 1);
        assert_eq!(
            run.replay_stats().events_applied,
            0,
            "jump recorded at tick {record_tick} replayed early"
        );
        run.tick(1);
        assert_eq!(
            run.replay_stats().events_applied,
            1,
            "jump recorded at tick {record_tick} replayed late"
        );
    }
}

#[test]
fn ghost_settles_on_recorded_pose_with_default_sizing() {
    let mut run = TestRun::quiet_with(|p| {
        p.ghost.smoothing_rate = 1000.0;
    });
    run.hold_right();
    run.tick(15);

    // With the catch-up rate uncapped the ghost sits exactly on the runner
    // sample recorded ten ticks earlier.
    let recorded: Vec<f32> = run.store().snapshots().map(|s| s.position.x).collect();
    let expected = recorded[recorded.len() - 11];
    assert!((run.ghost_x() - expected).abs() < 1e-6);
}

#[test]
fn jump_in_the_air_is_not_recorded() {
    let mut run = TestRun::quarter_second_lag();
    run.press_jump();
    run.tick(2);
    run.press_jump();
    run.tick(1);
    assert_eq!(run.store().stats().events_recorded, 1);
}
