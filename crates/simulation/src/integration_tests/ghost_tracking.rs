use crate::game_params::GameParams;
use crate::test_harness::TestRun;

/// Runner moving right at one unit per second on a 16 Hz tick, so its x equals
/// the clock time and every recorded sample is exact.
fn steady_runner(smoothing_rate: f32) -> TestRun {
    let mut run = TestRun::quiet_with(|p| {
        p.tick_seconds = 0.0625;
        p.ghost.lag_seconds = 0.25;
        p.ghost.smoothing_rate = smoothing_rate;
        p.runner.horizontal_speed = 1.0;
        p.runner.clamp_range = 10.0;
    });
    run.hold_right();
    run
}

#[test]
fn ghost_trails_runner_by_the_lag() {
    let mut run = steady_runner(100.0);
    run.tick(12);

    assert_eq!(run.runner_x(), 0.75);
    run.assert_ghost_x_near(0.5, 1e-5);

    run.tick(4);
    let runner_x = run.runner_x();
    run.assert_ghost_x_near(runner_x - 0.25, 1e-5);
}

#[test]
fn ghost_waits_for_two_samples() {
    let mut run = steady_runner(100.0);
    // After one tick there is a single sample: nothing to interpolate yet.
    run.tick(1);
    assert_eq!(run.store().snapshot_count(), 1);
    assert_eq!(run.ghost_x(), 0.0);
    assert_eq!(run.replay_stats().synced_ticks, 0);
    assert!(run.replay_stats().starved_ticks >= 1);
}

#[test]
fn ghost_catch_up_is_rate_limited() {
    let mut run = steady_runner(1.0);
    run.world_mut()
        .resource_mut::<GameParams>()
        .runner
        .horizontal_speed = 8.0;

    let max_step = 1.0 * 0.0625;
    let mut previous = run.ghost_x();
    for _ in 0..24 {
        run.tick(1);
        let x = run.ghost_x();
        assert!(
            (x - previous).abs() <= max_step + 1e-6,
            "ghost moved {} in one tick",
            x - previous
        );
        previous = x;
    }
    // Far behind its target by now.
    assert!(run.ghost_x() < run.runner_x() - 5.0);
}

#[test]
fn ghost_never_moves_itself_horizontally() {
    let mut run = steady_runner(100.0);
    run.tick(10);
    assert_eq!(run.ghost_body().velocity.x, 0.0);
}

#[test]
fn runner_is_clamped_to_its_lane() {
    let mut run = TestRun::quiet();
    run.hold_left();
    run.tick(100);
    let range = run.params().runner.clamp_range;
    assert_eq!(run.runner_x(), -range);
    // The ghost follows but stays within the recorded range too.
    assert!(run.ghost_x() >= -range);
}
