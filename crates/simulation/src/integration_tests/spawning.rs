use crate::game_params::GameParams;
use crate::pool::{Partition, PooledKind};
use crate::test_harness::TestRun;

#[test]
fn every_spawn_exists_in_both_partitions() {
    let mut run = TestRun::new();
    let ticks = run.tick_until(200, |run| run.active_objects(Partition::Live) >= 2);
    assert!(ticks.is_some(), "nothing spawned in 200 ticks");

    let live = run.object_positions(Partition::Live);
    let ghost = run.object_positions(Partition::Ghost);
    assert_eq!(live, ghost);
    let start_speed = run.params().spawn.start_speed;
    for (id, _, position) in &live {
        assert_ne!(*id, 0, "id 0 is reserved");
        assert!(position.x.abs() <= run.params().spawn.range_x);
        assert!(position.z < run.params().spawn.spawn_z);
    }
    assert!(run.session().object_speed >= start_speed);
}

#[test]
fn same_seed_spawns_the_same_run() {
    let mut a = TestRun::new();
    let mut b = TestRun::new();
    a.tick(300);
    b.tick(300);
    let spawned = a.object_positions(Partition::Live);
    assert!(!spawned.is_empty());
    assert_eq!(spawned, b.object_positions(Partition::Live));
}

#[test]
fn different_seeds_place_objects_differently() {
    let mut a = TestRun::new();
    let mut b = TestRun::with_params(GameParams {
        seed: 7,
        ..Default::default()
    });
    a.tick(300);
    b.tick(300);
    assert_ne!(
        a.object_positions(Partition::Live),
        b.object_positions(Partition::Live)
    );
}

#[test]
fn objects_past_the_runner_are_recycled() {
    let mut run = TestRun::quiet();
    let id = run.place_pair(PooledKind::Orb, bevy::math::Vec3::new(0.0, 0.0, -4.9), 10.0);
    let old_live = run.object(Partition::Live, id).expect("placed");
    let old_ghost = run.object(Partition::Ghost, id).expect("placed");

    run.tick(1);
    run.assert_active(Partition::Live, id, false);
    run.assert_active(Partition::Ghost, id, false);
    assert_eq!(run.free_objects(PooledKind::Orb), 2);

    {
        let world = run.world_mut();
        let mut params = world.resource_mut::<GameParams>();
        params.spawn.enabled = true;
        params.spawn.orb_interval = 0.03;
        params.spawn.obstacle_interval = 1000.0;
    }
    run.tick(2);

    assert_eq!(run.free_objects(PooledKind::Orb), 0);
    let reused = [old_live, old_ghost];
    let live = run.object(Partition::Live, id + 1).expect("new orb spawned");
    let ghost = run.object(Partition::Ghost, id + 1).expect("new orb spawned");
    assert!(reused.contains(&live));
    assert!(reused.contains(&ghost));
    assert!(!run.is_released(live));
}
