use bevy::prelude::*;

use crate::actors::GhostRunner;
use crate::game_params::GameParams;
use crate::physics::Body;
use crate::pool::{Partition, PoolAccess, PooledObject, Released};
use crate::sim_clock::SimClock;
use crate::sync_buffer::{ActionKind, HistoryStore, PlayerEvent};

/// Raised once for every action the ghost replays, in replay order.
///
/// `target` is the ghost-side entity that was released, or `None` for jumps
/// and for contacts whose counterpart no longer exists.
#[derive(Event, Debug, Clone)]
pub struct GhostEventApplied {
    pub ghost: Entity,
    pub event: PlayerEvent,
    pub target: Option<Entity>,
}

/// Running totals for the replay consumer.
#[derive(Resource, Debug, Clone, Default)]
pub struct ReplayStats {
    pub events_applied: u64,
    /// Contacts whose ghost-side counterpart could not be found.
    pub dangling_targets: u64,
    /// Ticks where an interpolated pose was available.
    pub synced_ticks: u64,
    /// Ticks skipped for lack of history.
    pub starved_ticks: u64,
    pub last_applied_at: Option<f32>,
}

impl ReplayStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Step `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Dequeue, in FIFO order, every event recorded at or before `horizon`,
/// handing each to `apply`. For a consumer trailing by a lag, `horizon` is the
/// clock time one lag ago.
///
/// Stops at the first event that is not yet due, so a stalled consumer drains
/// its whole backlog in one call and nothing is ever skipped or reordered.
pub fn drain_due_events<const S: usize, const E: usize>(
    store: &mut HistoryStore<S, E>,
    horizon: f32,
    mut apply: impl FnMut(PlayerEvent),
) -> usize {
    let mut applied = 0;
    while let Some(next) = store.peek_event() {
        if next.time > horizon {
            break;
        }
        let Some(event) = store.dequeue_event() else {
            break;
        };
        apply(event);
        applied += 1;
    }
    applied
}

/// Per-tick ghost update: horizontal catch-up, then due actions.
#[allow(clippy::too_many_arguments)]
pub fn replay_ghost(
    params: Res<GameParams>,
    clock: Res<SimClock>,
    mut store: ResMut<HistoryStore>,
    mut stats: ResMut<ReplayStats>,
    mut ghost: Query<(Entity, &mut Transform, &mut Body), With<GhostRunner>>,
    objects: Query<&PooledObject, Without<Released>>,
    mut access: PoolAccess,
    mut applied: EventWriter<GhostEventApplied>,
) {
    let Ok((ghost_entity, mut transform, mut body)) = ghost.get_single_mut() else {
        return;
    };
    let now = clock.now();
    let horizon = clock.time_before(params.ghost.lag_seconds);

    match store.interpolated_snapshot(horizon) {
        Some(snapshot) => {
            let max_step = params.ghost.smoothing_rate * clock.delta();
            transform.translation.x =
                move_towards(transform.translation.x, snapshot.position.x, max_step);
            stats.synced_ticks += 1;
        }
        None => stats.starved_ticks += 1,
    }
    body.velocity.x = 0.0;

    let jump_force = params.ghost.jump_force;
    drain_due_events(&mut *store, horizon, |event| {
        let target = match event.kind {
            ActionKind::Jump => {
                body.apply_impulse(Vec3::Y * jump_force);
                None
            }
            ActionKind::CollectOrb | ActionKind::HitObstacle => {
                let counterpart = access
                    .index
                    .lookup(Partition::Ghost, event.target_id)
                    .and_then(|entity| objects.get(entity).ok().map(|object| (entity, object)));
                match counterpart {
                    Some((entity, object)) => {
                        access.release(entity, Partition::Ghost, object);
                        Some(entity)
                    }
                    None => {
                        debug!(
                            "ghost replay: no ghost-side object {} for {:?} at {:.3}s",
                            event.target_id, event.kind, event.time
                        );
                        stats.dangling_targets += 1;
                        None
                    }
                }
            }
        };
        stats.events_applied += 1;
        stats.last_applied_at = Some(now);
        applied.send(GhostEventApplied {
            ghost: ghost_entity,
            event,
            target,
        });
    });
}
