//! Configuration errors
//!
//! The simulation itself has no recoverable failures; everything that can go
//! wrong is caught when a session is built from a `GameConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level-up threshold must be at least 1")]
    ZeroLevelUpThreshold,

    #[error("frames per score point must be at least 1")]
    ZeroScoreInterval,

    #[error("{field} must be positive and finite (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("minimum spawn interval {min_ms}ms exceeds initial interval {initial_ms}ms")]
    SpawnFloorAboveInitial { min_ms: u64, initial_ms: u64 },

    #[error("initial lives must be between 1 and {max} (got {lives})")]
    LivesOutOfRange { lives: u8, max: u8 },

    #[error("blink interval {blink_ms}ms exceeds invulnerability window {window_ms}ms")]
    BlinkLongerThanWindow { blink_ms: u64, window_ms: u64 },

    #[error("unknown difficulty preset: {0}")]
    UnknownPreset(String),
}
