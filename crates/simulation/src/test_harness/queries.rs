//! Query and simulation-tick methods for `TestRun`.

use bevy::prelude::*;

use crate::actors::{GhostRunner, Runner};
use crate::feedback::CollisionGlow;
use crate::game_params::GameParams;
use crate::ghost::{GhostEventApplied, ReplayStats};
use crate::physics::Body;
use crate::pool::{ObjectPool, Partition, PartitionIndex, PooledKind, PooledObject, Released};
use crate::session::RunSession;
use crate::sim_clock::SimClock;
use crate::sync_buffer::{HistoryStore, PlayerEvent};

use super::TestRun;

impl TestRun {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's virtual time, so each call is exactly
    /// one `SimClock` step.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until `done` holds, at most `max_ticks` times. Returns the number
    /// of ticks run, or `None` if the condition never held.
    pub fn tick_until(
        &mut self,
        max_ticks: u32,
        mut done: impl FnMut(&mut Self) -> bool,
    ) -> Option<u32> {
        for n in 1..=max_ticks {
            self.tick(1);
            if done(self) {
                return Some(n);
            }
        }
        None
    }

    // -----------------------------------------------------------------------
    // Resources
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn params(&self) -> &GameParams {
        self.app.world().resource::<GameParams>()
    }

    pub fn clock(&self) -> &SimClock {
        self.app.world().resource::<SimClock>()
    }

    pub fn now(&self) -> f32 {
        self.clock().now()
    }

    pub fn store(&self) -> &HistoryStore {
        self.app.world().resource::<HistoryStore>()
    }

    pub fn store_mut(&mut self) -> Mut<'_, HistoryStore> {
        self.app.world_mut().resource_mut::<HistoryStore>()
    }

    pub fn replay_stats(&self) -> &ReplayStats {
        self.app.world().resource::<ReplayStats>()
    }

    pub fn session(&self) -> &RunSession {
        self.app.world().resource::<RunSession>()
    }

    pub fn index(&self) -> &PartitionIndex {
        self.app.world().resource::<PartitionIndex>()
    }

    /// Every action the ghost has replayed so far, in replay order.
    pub fn replayed_events(&self) -> Vec<PlayerEvent> {
        self.app
            .world()
            .resource::<Events<GhostEventApplied>>()
            .iter_current_update_events()
            .map(|applied| applied.event)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Actors (note: Bevy's World::query() requires &mut World)
    // -----------------------------------------------------------------------

    pub fn runner_position(&mut self) -> Vec3 {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&Transform, With<Runner>>();
        query.single(world).translation
    }

    pub fn ghost_position(&mut self) -> Vec3 {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&Transform, With<GhostRunner>>();
        query.single(world).translation
    }

    pub fn runner_x(&mut self) -> f32 {
        self.runner_position().x
    }

    pub fn ghost_x(&mut self) -> f32 {
        self.ghost_position().x
    }

    pub fn ghost_body(&mut self) -> Body {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&Body, With<GhostRunner>>();
        query.single(world).clone()
    }

    pub fn runner_glow(&mut self) -> CollisionGlow {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&CollisionGlow, With<Runner>>();
        query.single(world).clone()
    }

    pub fn ghost_glow(&mut self) -> CollisionGlow {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&CollisionGlow, With<GhostRunner>>();
        query.single(world).clone()
    }

    // -----------------------------------------------------------------------
    // Pooled objects
    // -----------------------------------------------------------------------

    /// The active entity for `id` in `partition`.
    pub fn object(&self, partition: Partition, id: u32) -> Option<Entity> {
        self.index().lookup(partition, id)
    }

    pub fn active_objects(&self, partition: Partition) -> usize {
        self.index().active_in(partition)
    }

    pub fn is_released(&self, entity: Entity) -> bool {
        self.app.world().get::<Released>(entity).is_some()
    }

    pub fn free_objects(&self, kind: PooledKind) -> usize {
        self.app.world().resource::<ObjectPool>().free_count(kind)
    }

    /// `(id, kind, position)` of every active object in `partition`, by id.
    pub fn object_positions(&mut self, partition: Partition) -> Vec<(u32, PooledKind, Vec3)> {
        let world = self.app.world_mut();
        let mut query = world
            .query_filtered::<(&PooledObject, &Partition, &Transform), Without<Released>>();
        let mut objects: Vec<_> = query
            .iter(world)
            .filter(|(_, p, _)| **p == partition)
            .map(|(object, _, transform)| (object.id, object.kind, transform.translation))
            .collect();
        objects.sort_by_key(|(id, _, _)| *id);
        objects
    }
}
