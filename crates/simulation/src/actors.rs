use bevy::prelude::*;

use crate::feedback::CollisionGlow;
use crate::physics::{rest_height, Body};
use crate::pool::Partition;

/// The live, player-controlled runner. Its history feeds the ghost.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Runner;

/// The delayed replay of the runner.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct GhostRunner;

/// Where both actors start a run.
pub fn start_position() -> Vec3 {
    Vec3::new(0.0, rest_height(), 0.0)
}

pub fn spawn_actors(mut commands: Commands) {
    commands.spawn((
        Runner,
        Partition::Live,
        Transform::from_translation(start_position()),
        Body::default(),
        CollisionGlow::default(),
    ));
    commands.spawn((
        GhostRunner,
        Partition::Ghost,
        Transform::from_translation(start_position()),
        Body::default(),
        CollisionGlow::default(),
    ));
}

/// Put an actor back at the start line, at rest, unlit.
pub fn reset_actor(transform: &mut Transform, body: &mut Body, glow: &mut CollisionGlow) {
    transform.translation = start_position();
    body.stop();
    glow.clear();
}
