use bevy::prelude::Events;

use crate::ghost::GhostEventApplied;
use crate::pool::{Partition, PooledKind};
use crate::sync_buffer::{ActionKind, PlayerEvent};
use crate::test_harness::TestRun;

#[test]
fn collected_orb_disappears_for_the_ghost_one_lag_later() {
    let mut run = TestRun::quarter_second_lag();
    let id = run.place_pair_on_start_line(PooledKind::Orb);
    let ghost_copy = run.object(Partition::Ghost, id).expect("ghost copy placed");

    run.tick(1);
    run.assert_active(Partition::Live, id, false);
    run.assert_active(Partition::Ghost, id, true);
    assert_eq!(run.session().display_score(), 5);
    assert!(run.runner_glow().is_lit(PooledKind::Orb));

    run.tick(3);
    run.assert_active(Partition::Ghost, id, true);
    assert!(!run.ghost_glow().is_lit(PooledKind::Orb));

    run.tick(1);
    run.assert_active(Partition::Ghost, id, false);
    assert!(run.is_released(ghost_copy));
    assert!(run.ghost_glow().is_lit(PooledKind::Orb));
}

#[test]
fn orb_is_collected_only_once() {
    let mut run = TestRun::quarter_second_lag();
    run.place_pair_on_start_line(PooledKind::Orb);
    run.tick(10);
    assert_eq!(run.store().stats().events_recorded, 1);
    assert_eq!(run.replay_stats().events_applied, 1);
}

#[test]
fn backlog_drains_in_one_tick_in_order() {
    let mut run = TestRun::quarter_second_lag();
    let orb = run.place_pair_far_ahead(PooledKind::Orb, -1.0);
    let obstacle = run.place_pair_far_ahead(PooledKind::Obstacle, 1.0);
    let later = run.place_pair_far_ahead(PooledKind::Orb, 0.0);
    run.tick(8);

    {
        let mut store = run.store_mut();
        store.record_event(PlayerEvent::collect_orb(0.0625, orb));
        store.record_event(PlayerEvent::hit_obstacle(0.125, obstacle));
        store.record_event(PlayerEvent::jump(0.1875));
        store.record_event(PlayerEvent::collect_orb(5.0, later));
    }
    run.tick(1);

    let kinds: Vec<ActionKind> = run.replayed_events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ActionKind::CollectOrb, ActionKind::HitObstacle, ActionKind::Jump]
    );
    run.assert_active(Partition::Ghost, orb, false);
    run.assert_active(Partition::Ghost, obstacle, false);
    run.assert_active(Partition::Ghost, later, true);
    // The live side is untouched by replay.
    run.assert_active(Partition::Live, orb, true);
    run.assert_active(Partition::Live, obstacle, true);
    assert_eq!(run.store().pending_events(), 1);
}

#[test]
fn missing_ghost_target_is_consumed_quietly() {
    let mut run = TestRun::quarter_second_lag();
    run.tick(8);
    run.store_mut().record_event(PlayerEvent::collect_orb(0.0, 999));
    run.tick(1);

    let stats = run.replay_stats();
    assert_eq!(stats.events_applied, 1);
    assert_eq!(stats.dangling_targets, 1);
    assert_eq!(run.store().pending_events(), 0);

    let applied: Vec<GhostEventApplied> = run
        .world_mut()
        .resource::<Events<GhostEventApplied>>()
        .iter_current_update_events()
        .cloned()
        .collect();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].target, None);
}

#[test]
fn overflowing_event_ring_replays_only_the_newest() {
    let mut run = TestRun::quarter_second_lag();
    run.tick(8);
    let capacity = run.store().event_capacity();
    {
        let mut store = run.store_mut();
        for i in 0..capacity + 8 {
            store.record_event(PlayerEvent::jump(i as f32 * 0.001));
        }
    }
    assert_eq!(run.store().stats().events_overwritten, 8);

    run.tick(1);
    let replayed = run.replayed_events();
    assert_eq!(replayed.len(), capacity);
    assert_eq!(replayed[0].time, 8.0 * 0.001);
}

#[test]
fn obstacle_copy_is_released_for_the_ghost() {
    let mut run = TestRun::quarter_second_lag();
    let id = run.place_pair_on_start_line(PooledKind::Obstacle);
    run.tick(4);
    run.assert_active(Partition::Ghost, id, true);
    run.tick(1);
    run.assert_active(Partition::Ghost, id, false);
    assert!(run.ghost_glow().is_lit(PooledKind::Obstacle));
}
