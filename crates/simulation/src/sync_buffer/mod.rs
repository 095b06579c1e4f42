//! Bounded runner history: a pose ring for interpolation and an action ring
//! drained in FIFO order by the ghost.
//!
//! The runner is the only writer. The ghost reads both rings and is the only
//! consumer of the action ring. Both rings overwrite their oldest entry once
//! full, so only the most recent `capacity * tick_seconds` of history is ever
//! available.

mod plugin;
mod ring;
mod store;
mod types;

pub use plugin::SyncBufferPlugin;
pub use ring::HistoryRing;
pub use store::{HistoryStats, HistoryStore};
pub use types::{ActionKind, PlayerEvent, Snapshot};
