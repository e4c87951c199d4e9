//! Astro Dodge - An arcade obstacle-dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, progression)
//! - `game_loop`: Frame-driven orchestration, pause/resume, session control
//! - `config`: Data-driven game balance
//! - `platform`: Collaborator seams for HUD, music and input
//! - `renderer`: Frame snapshots handed to the draw collaborator

pub mod config;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{DifficultyPreset, FallSpeedPolicy, GameConfig};
pub use error::ConfigError;
pub use game_loop::{GameLoop, LoopControl, LoopPhase};

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh used by the headless driver (60 Hz)
    pub const FRAME_DT_SECS: f64 = 1.0 / 60.0;

    /// Play area the player is clamped to
    pub const PLAYER_MIN_X: f32 = -3.0;
    pub const PLAYER_MAX_X: f32 = 3.0;
    pub const PLAYER_MIN_Y: f32 = -4.0;
    pub const PLAYER_MAX_Y: f32 = 4.0;
    /// Where a new player appears
    pub const PLAYER_START_Y: f32 = -2.0;

    /// Obstacles enter here and are evicted below the despawn line
    pub const SPAWN_Y: f32 = 5.0;
    pub const SPAWN_Y_JITTER: f32 = 0.4;
    pub const DESPAWN_Y: f32 = -5.0;

    /// Hearts shown on the HUD
    pub const MAX_LIVES: u8 = 5;

    /// Background starfield extents
    pub const STAR_HALF_WIDTH: f32 = 8.0;
    pub const STAR_HALF_HEIGHT: f32 = 6.0;
    pub const STAR_WRAP_Y: f32 = 7.0;
}

/// Duration of one nominal display frame
#[inline]
pub fn frame_duration() -> Duration {
    Duration::from_secs_f64(consts::FRAME_DT_SECS)
}

/// Format the HUD status line, one heart per remaining life
pub fn hud_line(score: u32, level: u32, lives: u8) -> String {
    let full = usize::from(lives.min(consts::MAX_LIVES));
    let empty = usize::from(consts::MAX_LIVES) - full;
    format!(
        "Level: {} | Score: {} | Lives: {}{}",
        level,
        score,
        "♥".repeat(full),
        "♡".repeat(empty)
    )
}
