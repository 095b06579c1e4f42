//! Dual history buffer shared by the runner (writer) and the ghost (reader).
//!
//! The snapshot ring is query-only: interpolation never removes samples. The
//! event ring is a strict FIFO drained by a single consumer via
//! [`HistoryStore::peek_event`] / [`HistoryStore::dequeue_event`].

use bevy::prelude::*;

use crate::config::{EVENT_CAPACITY, SNAPSHOT_CAPACITY};

use super::ring::HistoryRing;
use super::types::{PlayerEvent, Snapshot};

/// Overwrite counters, useful for spotting an undersized ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub snapshots_recorded: u64,
    pub snapshots_overwritten: u64,
    pub events_recorded: u64,
    pub events_overwritten: u64,
}

/// Fixed-capacity pose and action history for one run.
///
/// Capacities are const parameters: `S` snapshots (at least 2, interpolation
/// needs a bracketing pair) and `E` events (at least 1). Appends never fail;
/// once a ring is full the oldest entry is overwritten.
#[derive(Resource, Debug, Clone)]
pub struct HistoryStore<const S: usize = SNAPSHOT_CAPACITY, const E: usize = EVENT_CAPACITY> {
    snapshots: HistoryRing<Snapshot, S>,
    events: HistoryRing<PlayerEvent, E>,
    stats: HistoryStats,
}

impl<const S: usize, const E: usize> Default for HistoryStore<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const S: usize, const E: usize> HistoryStore<S, E> {
    pub fn new() -> Self {
        const { assert!(S >= 2, "snapshot ring needs room for a bracketing pair") };
        Self {
            snapshots: HistoryRing::new(),
            events: HistoryRing::new(),
            stats: HistoryStats::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Producer side
    // -----------------------------------------------------------------------

    /// Append a pose sample. Times must be non-decreasing; the store does not sort.
    pub fn record_snapshot(&mut self, time: f32, position: Vec3) {
        debug_assert!(
            self.snapshots.back().map_or(true, |last| last.time <= time),
            "snapshots must be recorded in time order"
        );
        self.stats.snapshots_recorded += 1;
        if self.snapshots.push_back(Snapshot { time, position }) {
            self.stats.snapshots_overwritten += 1;
        }
    }

    /// Append an action. Uses its own ring, independent of the snapshots.
    pub fn record_event(&mut self, event: PlayerEvent) {
        self.stats.events_recorded += 1;
        if self.events.push_back(event) {
            self.stats.events_overwritten += 1;
        }
    }

    // -----------------------------------------------------------------------
    // Consumer side
    // -----------------------------------------------------------------------

    /// Pose at `target_time`, linearly interpolated between stored samples.
    ///
    /// Scans oldest to newest for the first sample with `time >= target_time`
    /// and blends it with the sample stored just before it. Ties resolve to the
    /// earlier sample. When every sample is older than `target_time` the newest
    /// sample is returned as-is: the pose clamps rather than extrapolates. When
    /// the first match is the oldest resident sample there is nothing earlier
    /// to blend with, so its position is returned stamped at `target_time`.
    ///
    /// Returns `None` with fewer than two samples stored.
    pub fn interpolated_snapshot(&self, target_time: f32) -> Option<Snapshot> {
        if self.snapshots.len() < 2 {
            return None;
        }

        let mut before: Option<&Snapshot> = None;
        for after in self.snapshots.iter() {
            if after.time >= target_time {
                let before = before.unwrap_or(after);
                let span = after.time - before.time;
                let t = if span > 0.0 {
                    ((target_time - before.time) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return Some(Snapshot {
                    time: target_time,
                    position: before.position.lerp(after.position, t),
                });
            }
            before = Some(after);
        }

        self.snapshots.back().copied()
    }

    /// Oldest unconsumed action, left in place.
    pub fn peek_event(&self) -> Option<PlayerEvent> {
        self.events.front().copied()
    }

    /// Remove and return the oldest unconsumed action.
    ///
    /// Callers peek first; on an empty ring this returns `None` instead of
    /// handing back stale data.
    pub fn dequeue_event(&mut self) -> Option<PlayerEvent> {
        self.events.pop_front()
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub const fn snapshot_capacity(&self) -> usize {
        S
    }

    pub const fn event_capacity(&self) -> usize {
        E
    }

    /// Stored pose samples, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> + '_ {
        self.snapshots.iter()
    }

    pub fn stats(&self) -> HistoryStats {
        self.stats
    }

    /// Drop all history, as at the start of a fresh run.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
