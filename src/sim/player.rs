//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::DirectionalInput;
use crate::consts::*;

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Drawn this frame (toggled while blinking after a hit)
    pub visible: bool,
    /// Distance moved per tick per held direction
    step: f32,
}

impl Player {
    pub fn new(step: f32) -> Self {
        Self {
            pos: Vec2::new(0.0, PLAYER_START_Y),
            visible: true,
            step,
        }
    }

    /// Apply one tick of movement, then clamp to the play area.
    ///
    /// Axes are independent, so a diagonal moves `step` on each axis.
    pub fn move_by(&mut self, input: &DirectionalInput) {
        if input.left {
            self.pos.x -= self.step;
        }
        if input.right {
            self.pos.x += self.step;
        }
        if input.up {
            self.pos.y += self.step;
        }
        if input.down {
            self.pos.y -= self.step;
        }
        self.clamp_to_play_area();
    }

    /// Place the player directly (clamped like any other move)
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.clamp_to_play_area();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn clamp_to_play_area(&mut self) {
        self.pos.x = self.pos.x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        self.pos.y = self.pos.y.clamp(PLAYER_MIN_Y, PLAYER_MAX_Y);
    }
}
