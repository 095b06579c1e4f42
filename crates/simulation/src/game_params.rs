//! Data-driven run parameters.
//!
//! Every tunable the runner, ghost, spawner and feedback systems read lives in
//! the [`GameParams`] resource, grouped per concern. Parameters can be loaded
//! from JSON; missing fields keep their defaults.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_TICK_SECONDS, SNAPSHOT_CAPACITY};

// ---------------------------------------------------------------------------
// Per-concern groups
// ---------------------------------------------------------------------------

/// Delayed replay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostParams {
    /// How far behind the runner the ghost plays back, in seconds.
    pub lag_seconds: f32,
    /// Maximum horizontal catch-up speed in units/second.
    pub smoothing_rate: f32,
    /// Upward impulse applied when a replayed jump comes due.
    pub jump_force: f32,
}

impl Default for GhostParams {
    fn default() -> Self {
        Self {
            lag_seconds: 0.2,
            smoothing_rate: 10.0,
            jump_force: 7.0,
        }
    }
}

/// Live runner control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerParams {
    pub horizontal_speed: f32,
    pub jump_force: f32,
    /// The runner is kept within `-clamp_range..=clamp_range` on x.
    pub clamp_range: f32,
    /// Extra distance below the feet that still counts as standing.
    pub floor_detection: f32,
}

impl Default for RunnerParams {
    fn default() -> Self {
        Self {
            horizontal_speed: 5.0,
            jump_force: 7.0,
            clamp_range: 1.5,
            floor_detection: 0.1,
        }
    }
}

/// Obstacle/orb spawning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParams {
    /// When false no obstacles or orbs appear.
    pub enabled: bool,
    pub obstacle_interval: f32,
    pub orb_interval: f32,
    /// Objects spawn within `-range_x..=range_x`.
    pub range_x: f32,
    pub spawn_z: f32,
    /// Objects behind this z are returned to the pool.
    pub despawn_z: f32,
    pub start_speed: f32,
    /// Minimum x gap between an obstacle and the most recent orb (and vice versa).
    pub min_separation: f32,
    pub max_attempts: u32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            enabled: true,
            obstacle_interval: 1.2,
            orb_interval: 1.7,
            range_x: 1.5,
            spawn_z: 20.0,
            despawn_z: -5.0,
            start_speed: 1.0,
            min_separation: 0.5,
            max_attempts: 10,
        }
    }
}

/// Glow, hit effect and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackParams {
    pub glow_seconds: f32,
    /// Delay between an obstacle hit and game over.
    pub hit_effect_seconds: f32,
    pub orb_points: u32,
    /// Passive score gained per second survived.
    pub score_rate: f32,
}

impl Default for FeedbackParams {
    fn default() -> Self {
        Self {
            glow_seconds: 0.15,
            hit_effect_seconds: 0.2,
            orb_points: 5,
            score_rate: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// GameParams resource
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    /// Fixed simulation step in seconds.
    pub tick_seconds: f32,
    /// Vertical acceleration applied to both actors (negative = down).
    pub gravity: f32,
    /// Seed for spawn placement.
    pub seed: u64,
    pub ghost: GhostParams,
    pub runner: RunnerParams,
    pub spawn: SpawnParams,
    pub feedback: FeedbackParams,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            tick_seconds: DEFAULT_TICK_SECONDS,
            gravity: -9.81,
            seed: 42,
            ghost: GhostParams::default(),
            runner: RunnerParams::default(),
            spawn: SpawnParams::default(),
            feedback: FeedbackParams::default(),
        }
    }
}

/// Problems found while loading or validating [`GameParams`].
#[derive(Debug)]
pub enum ParamsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NonPositiveTick(f32),
    NegativeLag(f32),
    /// The pose ring forgets samples before the ghost gets to them.
    HistoryTooShort {
        capacity: usize,
        covered_seconds: f32,
        lag_seconds: f32,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "failed to read params: {e}"),
            ParamsError::Parse(e) => write!(f, "failed to parse params: {e}"),
            ParamsError::NonPositiveTick(t) => {
                write!(f, "tick_seconds must be positive, got {t}")
            }
            ParamsError::NegativeLag(l) => write!(f, "ghost lag must not be negative, got {l}"),
            ParamsError::HistoryTooShort {
                capacity,
                covered_seconds,
                lag_seconds,
            } => write!(
                f,
                "{capacity} snapshots cover {covered_seconds:.3}s but the ghost lags {lag_seconds:.3}s; \
                 the ghost will run out of history"
            ),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io(e) => Some(e),
            ParamsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::Io(e)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Parse(e)
    }
}

impl GameParams {
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: GameParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from `path`, logging a warning and falling back to defaults on failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_json_file(path) {
            Ok(params) => params,
            Err(e) => {
                warn!(
                    "GameParams: {} ({}), falling back to defaults",
                    e,
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Structural checks plus history coverage for the default ring size.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.tick_seconds > 0.0) {
            return Err(ParamsError::NonPositiveTick(self.tick_seconds));
        }
        if self.ghost.lag_seconds < 0.0 {
            return Err(ParamsError::NegativeLag(self.ghost.lag_seconds));
        }
        self.check_history_coverage(SNAPSHOT_CAPACITY)
    }

    /// A pose ring of `capacity` samples must span more than the ghost lag.
    pub fn check_history_coverage(&self, capacity: usize) -> Result<(), ParamsError> {
        let covered_seconds = capacity as f32 * self.tick_seconds;
        if covered_seconds > self.ghost.lag_seconds {
            Ok(())
        } else {
            Err(ParamsError::HistoryTooShort {
                capacity,
                covered_seconds,
                lag_seconds: self.ghost.lag_seconds,
            })
        }
    }
}
