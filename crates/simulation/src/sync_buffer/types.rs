use bevy::prelude::*;

use crate::config::NO_TARGET;

/// Runner pose at one simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Snapshot {
    pub time: f32,
    pub position: Vec3,
}

/// Discrete runner actions replayed verbatim by the ghost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionKind {
    #[default]
    Jump,
    CollectOrb,
    HitObstacle,
}

/// A timestamped runner action. `target_id` is the spawn id of the object
/// touched, or [`NO_TARGET`] for self actions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerEvent {
    pub time: f32,
    pub kind: ActionKind,
    pub target_id: u32,
}

impl PlayerEvent {
    pub fn jump(time: f32) -> Self {
        Self {
            time,
            kind: ActionKind::Jump,
            target_id: NO_TARGET,
        }
    }

    pub fn collect_orb(time: f32, target_id: u32) -> Self {
        Self {
            time,
            kind: ActionKind::CollectOrb,
            target_id,
        }
    }

    pub fn hit_obstacle(time: f32, target_id: u32) -> Self {
        Self {
            time,
            kind: ActionKind::HitObstacle,
            target_id,
        }
    }
}
