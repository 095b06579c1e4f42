//! Delayed replay of the runner.
//!
//! Every fixed tick the ghost asks the history store for the runner's pose at
//! `now - lag_seconds` and eases toward it on x, then applies every recorded
//! action that has come due, oldest first. Vertical motion is never copied from
//! the history: replayed jumps are impulses fed to the ghost's own physics.

mod plugin;
mod replay;

pub use plugin::GhostPlugin;
pub use replay::{drain_due_events, move_towards, replay_ghost, GhostEventApplied, ReplayStats};
