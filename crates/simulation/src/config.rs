/// Capacity of the runner pose ring. At the default 50 Hz tick this covers
/// 0.64 s of history, comfortably more than the default ghost lag.
pub const SNAPSHOT_CAPACITY: usize = 32;
/// Capacity of the discrete action ring (jumps and contacts).
pub const EVENT_CAPACITY: usize = 32;

/// Default fixed step in seconds (50 Hz).
pub const DEFAULT_TICK_SECONDS: f32 = 0.02;

/// Half height of both actors. Their centre rests at this height on the floor.
pub const ACTOR_HALF_HEIGHT: f32 = 0.5;
/// Half extent of the actor contact box on every axis.
pub const ACTOR_HALF_EXTENT: f32 = 0.5;
/// Half extent of pooled obstacle/orb contact boxes on every axis.
pub const OBJECT_HALF_EXTENT: f32 = 0.5;

/// World-space height of the floor plane.
pub const FLOOR_Y: f32 = 0.0;

/// Target id carried by events that do not refer to another entity (jumps).
pub const NO_TARGET: u32 = 0;
