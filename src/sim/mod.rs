//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod obstacle;
pub mod player;
pub mod progression;
pub mod session;
pub mod starfield;
pub mod tick;
pub mod timer;

pub use collision::{nearest_obstacle, player_hit};
pub use input::{CombinedInput, DirectionalInput, InputSource, KeyCommand, KeyState, PointerSteering};
pub use obstacle::{
    MULTI_SPAWN_LEVEL, Obstacle, ObstacleField, Tier, spawn_count_for_level, tier_for_level,
};
pub use player::Player;
pub use progression::{GameEvent, HitOutcome, ProgressionController, ProgressionState};
pub use session::Session;
pub use starfield::{Star, Starfield};
pub use tick::{TickReport, tick};
pub use timer::{Timer, TimerMode};
