//! Builder and input methods for arranging integration test scenarios.

use bevy::prelude::*;

use crate::pool::{Partition, PartitionIndex, PooledKind, PooledObject};
use crate::runner::PlayerInput;
use crate::session::RestartRun;
use crate::spawner::IdGenerator;

use super::TestRun;

impl TestRun {
    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Request a jump on the next tick.
    pub fn press_jump(&mut self) {
        self.input_mut().request_jump();
    }

    pub fn hold_left(&mut self) {
        let mut input = self.input_mut();
        input.left = true;
        input.right = false;
    }

    pub fn hold_right(&mut self) {
        let mut input = self.input_mut();
        input.left = false;
        input.right = true;
    }

    pub fn release_keys(&mut self) {
        *self.input_mut() = PlayerInput::default();
    }

    fn input_mut(&mut self) -> Mut<'_, PlayerInput> {
        self.app.world_mut().resource_mut::<PlayerInput>()
    }

    pub fn restart(&mut self) {
        self.app.world_mut().send_event(RestartRun);
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// Place a live/ghost pair of `kind` at `position`, bypassing the spawner.
    /// Returns the shared spawn id.
    pub fn place_pair(&mut self, kind: PooledKind, position: Vec3, speed: f32) -> u32 {
        let world = self.app.world_mut();
        let id = world.resource_mut::<IdGenerator>().next_id();
        for partition in [Partition::Live, Partition::Ghost] {
            let entity = world
                .spawn((
                    PooledObject { id, kind, speed },
                    partition,
                    Transform::from_translation(position),
                ))
                .id();
            world
                .resource_mut::<PartitionIndex>()
                .insert(partition, id, entity);
        }
        id
    }

    /// Place a stationary pair right where both actors start.
    pub fn place_pair_on_start_line(&mut self, kind: PooledKind) -> u32 {
        self.place_pair(kind, Vec3::ZERO, 0.0)
    }

    /// Place a stationary pair well ahead of both actors, out of reach.
    pub fn place_pair_far_ahead(&mut self, kind: PooledKind, x: f32) -> u32 {
        self.place_pair(kind, Vec3::new(x, 0.0, 15.0), 0.0)
    }
}
