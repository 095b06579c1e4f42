//! Minimal vertical physics for the two actors.
//!
//! Bodies fall under `GameParams::gravity`, take instantaneous impulses and rest
//! on a flat floor. Horizontal velocity is integrated too; the ghost simply
//! keeps its x velocity at zero and is moved kinematically on that axis.

use bevy::prelude::*;

use crate::config::{ACTOR_HALF_HEIGHT, FLOOR_Y};
use crate::game_params::GameParams;
use crate::sim_clock::SimClock;

#[derive(Component, Debug, Clone)]
pub struct Body {
    pub velocity: Vec3,
    pub mass: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 1.0,
        }
    }
}

impl Body {
    /// Instantaneous change of momentum: `Δv = impulse / mass`.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
    }
}

/// Resting height of an actor's centre.
pub fn rest_height() -> f32 {
    FLOOR_Y + ACTOR_HALF_HEIGHT
}

/// Whether a centre at `y` is within `tolerance` of standing on the floor.
pub fn is_grounded(y: f32, tolerance: f32) -> bool {
    y - rest_height() <= tolerance
}

/// Advance one body by `dt` seconds: gravity, velocity, floor contact.
pub fn step_body(translation: &mut Vec3, body: &mut Body, gravity: f32, dt: f32) {
    body.velocity.y += gravity * dt;
    *translation += body.velocity * dt;

    let floor = rest_height();
    if translation.y <= floor {
        translation.y = floor;
        if body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
    }
}

pub fn integrate_bodies(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut bodies: Query<(&mut Transform, &mut Body)>,
) {
    let dt = clock.delta();
    for (mut transform, mut body) in &mut bodies {
        step_body(&mut transform.translation, &mut body, params.gravity, dt);
    }
}
