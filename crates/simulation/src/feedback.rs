//! Collision glow feedback for both actors.
//!
//! A glow is a timestamp: arming it stores `now + glow_seconds`, and a per-tick
//! check turns it off once the clock passes that point. Nothing is scheduled,
//! so cancelling a glow is just not arming it again.

use bevy::prelude::*;

use crate::actors::{GhostRunner, Runner};
use crate::game_params::GameParams;
use crate::ghost::GhostEventApplied;
use crate::pool::PooledKind;
use crate::session::run_is_active;
use crate::sim_clock::SimClock;
use crate::sync_buffer::ActionKind;
use crate::SimulationSet;

/// The runner touched a live-side object this tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct LiveContact {
    pub kind: PooledKind,
    pub target_id: u32,
}

/// Per-actor glow flags, one per object kind.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct CollisionGlow {
    pub orb_until: Option<f32>,
    pub obstacle_until: Option<f32>,
}

impl CollisionGlow {
    pub fn arm(&mut self, kind: PooledKind, now: f32, duration: f32) {
        let until = Some(now + duration);
        match kind {
            PooledKind::Orb => self.orb_until = until,
            PooledKind::Obstacle => self.obstacle_until = until,
        }
    }

    /// Turn off every glow whose time is up.
    pub fn expire(&mut self, now: f32) {
        if self.orb_until.is_some_and(|t| now >= t) {
            self.orb_until = None;
        }
        if self.obstacle_until.is_some_and(|t| now >= t) {
            self.obstacle_until = None;
        }
    }

    pub fn is_lit(&self, kind: PooledKind) -> bool {
        match kind {
            PooledKind::Orb => self.orb_until.is_some(),
            PooledKind::Obstacle => self.obstacle_until.is_some(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Object kind touched by a replayed action, if it touched one.
pub fn contact_kind(kind: ActionKind) -> Option<PooledKind> {
    match kind {
        ActionKind::Jump => None,
        ActionKind::CollectOrb => Some(PooledKind::Orb),
        ActionKind::HitObstacle => Some(PooledKind::Obstacle),
    }
}

pub fn glow_on_live_contact(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut contacts: EventReader<LiveContact>,
    mut runner: Query<&mut CollisionGlow, With<Runner>>,
) {
    for contact in contacts.read() {
        for mut glow in &mut runner {
            glow.arm(contact.kind, clock.now(), params.feedback.glow_seconds);
        }
    }
}

pub fn glow_on_ghost_replay(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut replayed: EventReader<GhostEventApplied>,
    mut ghosts: Query<&mut CollisionGlow, With<GhostRunner>>,
) {
    for applied in replayed.read() {
        let Some(kind) = contact_kind(applied.event.kind) else {
            continue;
        };
        if let Ok(mut glow) = ghosts.get_mut(applied.ghost) {
            glow.arm(kind, clock.now(), params.feedback.glow_seconds);
        }
    }
}

pub fn expire_glow(clock: Res<SimClock>, mut glows: Query<&mut CollisionGlow>) {
    let now = clock.now();
    for mut glow in &mut glows {
        if glow.orb_until.is_some() || glow.obstacle_until.is_some() {
            glow.expire(now);
        }
    }
}

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LiveContact>().add_systems(
            FixedUpdate,
            (expire_glow, glow_on_live_contact, glow_on_ghost_replay)
                .chain()
                .in_set(SimulationSet::PostSim)
                .run_if(run_is_active),
        );
    }
}
