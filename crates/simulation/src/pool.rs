//! Pooled obstacles and orbs, split into a live and a ghost partition.
//!
//! Every spawn id exists once per partition. The [`PartitionIndex`] resolves
//! `(partition, id)` to the active entity so the ghost can find its own copy of
//! whatever the runner touched without ever seeing live-side entities.
//!
//! Released entities keep their components and carry a [`Released`] marker
//! until [`PoolAccess::acquire`] hands them out again.

use std::collections::HashMap;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::session::PendingHit;
use crate::sim_clock::SimClock;

/// Which copy of the world an entity belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Live,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PooledKind {
    Obstacle,
    Orb,
}

impl PooledKind {
    pub fn name(self) -> &'static str {
        match self {
            PooledKind::Obstacle => "obstacle",
            PooledKind::Orb => "orb",
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct PooledObject {
    /// Spawn id shared by the live and ghost copies.
    pub id: u32,
    pub kind: PooledKind,
    /// Drift speed toward the runners, units/second.
    pub speed: f32,
}

/// Marker for an entity sitting in the pool's free list.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Released;

/// `(partition, spawn id) → entity` for every active pooled object.
#[derive(Resource, Debug, Default)]
pub struct PartitionIndex {
    entries: HashMap<(Partition, u32), Entity>,
}

impl PartitionIndex {
    pub fn lookup(&self, partition: Partition, id: u32) -> Option<Entity> {
        self.entries.get(&(partition, id)).copied()
    }

    pub fn insert(&mut self, partition: Partition, id: u32, entity: Entity) {
        self.entries.insert((partition, id), entity);
    }

    /// Remove the mapping only if it still points at `entity`.
    pub fn remove_if(&mut self, partition: Partition, id: u32, entity: Entity) -> bool {
        match self.entries.get(&(partition, id)) {
            Some(&current) if current == entity => {
                self.entries.remove(&(partition, id));
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_in(&self, partition: Partition) -> usize {
        self.entries.keys().filter(|(p, _)| *p == partition).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Free lists of released entities, one per kind.
#[derive(Resource, Debug, Default)]
pub struct ObjectPool {
    free_obstacles: Vec<Entity>,
    free_orbs: Vec<Entity>,
}

impl ObjectPool {
    fn free_list(&mut self, kind: PooledKind) -> &mut Vec<Entity> {
        match kind {
            PooledKind::Obstacle => &mut self.free_obstacles,
            PooledKind::Orb => &mut self.free_orbs,
        }
    }

    pub fn free_count(&self, kind: PooledKind) -> usize {
        match kind {
            PooledKind::Obstacle => self.free_obstacles.len(),
            PooledKind::Orb => self.free_orbs.len(),
        }
    }
}

/// Borrow/return access to the pool for systems.
#[derive(SystemParam)]
pub struct PoolAccess<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub pool: ResMut<'w, ObjectPool>,
    pub index: ResMut<'w, PartitionIndex>,
}

impl PoolAccess<'_, '_> {
    /// Activate an object of `kind` in `partition`, reusing a released entity
    /// when one is available.
    pub fn acquire(
        &mut self,
        partition: Partition,
        object: PooledObject,
        position: Vec3,
    ) -> Entity {
        let id = object.id;
        let bundle = (object.clone(), partition, Transform::from_translation(position));
        let reused = self
            .pool
            .free_list(object.kind)
            .pop()
            .and_then(|entity| self.commands.get_entity(entity).map(|cmds| cmds.id()));

        let entity = match reused {
            Some(entity) => {
                self.commands
                    .entity(entity)
                    .remove::<Released>()
                    .insert(bundle);
                entity
            }
            None => self.commands.spawn(bundle).id(),
        };
        self.index.insert(partition, id, entity);
        entity
    }

    /// Return an object to the pool, clearing any hit still pending on it.
    /// Releasing something that is no longer active (already released, or
    /// replaced) does nothing and returns `false`.
    pub fn release(&mut self, entity: Entity, partition: Partition, object: &PooledObject) -> bool {
        if !self.index.remove_if(partition, object.id, entity) {
            return false;
        }
        self.commands
            .entity(entity)
            .remove::<PendingHit>()
            .insert(Released);
        self.pool.free_list(object.kind).push(entity);
        true
    }
}

/// Move active objects toward the runners and recycle the ones that passed them.
pub fn drift_objects(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut objects: Query<(Entity, &mut Transform, &PooledObject, &Partition), Without<Released>>,
    mut access: PoolAccess,
) {
    let dt = clock.delta();
    for (entity, mut transform, object, partition) in &mut objects {
        transform.translation.z -= object.speed * dt;
        if transform.translation.z < params.spawn.despawn_z {
            access.release(entity, *partition, object);
        }
    }
}
