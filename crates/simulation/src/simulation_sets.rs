//! Deterministic tick ordering via `SystemSet` phases.
//!
//! # FixedUpdate phases (`SimulationSet`)
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – clock advance, restart handling, spawning and object drift.
//! * **Simulation** – runner control, ghost replay, physics integration and
//!   live contact detection. Ghost replay runs before integration so that a
//!   replayed jump impulse is integrated in the tick it comes due.
//! * **PostSim** – recording the runner pose, glow expiry, score and game-over
//!   bookkeeping. The pose recorded here is the post-physics pose of the tick.
//!
//! All gameplay sets except the clock and restart handling are gated on the
//! run being active, so the world freezes on game over.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
