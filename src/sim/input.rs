//! Directional input snapshots and the sources that produce them
//!
//! The simulation only ever sees a `DirectionalInput`. Keyboard state and
//! pointer steering are two interchangeable ways of producing one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYER_MAX_X, PLAYER_MIN_X};

/// Movement intents sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionalInput {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    pub fn is_idle(&self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }

    /// Combine two snapshots; a direction is held if either source holds it
    pub fn merge(self, other: Self) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// Anything that can produce a movement snapshot for the current player position
pub trait InputSource {
    fn sample(&self, player_pos: Vec2) -> DirectionalInput;
}

impl InputSource for DirectionalInput {
    fn sample(&self, _player_pos: Vec2) -> DirectionalInput {
        *self
    }
}

/// Commands carried by keys that are not movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Pause,
}

/// Held-key state fed by platform key events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: DirectionalInput,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key event by its `KeyboardEvent.code` name.
    ///
    /// Returns a command for non-movement keys on press.
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> Option<KeyCommand> {
        match code {
            "KeyA" | "ArrowLeft" => self.held.left = pressed,
            "KeyD" | "ArrowRight" => self.held.right = pressed,
            "KeyW" | "ArrowUp" => self.held.up = pressed,
            "KeyS" | "ArrowDown" => self.held.down = pressed,
            "Escape" if pressed => return Some(KeyCommand::Pause),
            _ => {}
        }
        None
    }

    /// Release everything (focus loss)
    pub fn clear(&mut self) {
        self.held = DirectionalInput::NONE;
    }

    pub fn held(&self) -> DirectionalInput {
        self.held
    }
}

impl InputSource for KeyState {
    fn sample(&self, _player_pos: Vec2) -> DirectionalInput {
        self.held
    }
}

/// Mouse-driven steering toward an absolute horizontal target.
///
/// The pointer's fraction across the viewport maps onto the play area width;
/// the player is nudged toward it through ordinary left/right intents.
#[derive(Debug, Clone, Default)]
pub struct PointerSteering {
    target_x: Option<f32>,
    dead_zone: f32,
}

impl PointerSteering {
    /// `dead_zone` is the distance at which the player counts as arrived;
    /// half a movement step avoids jittering around the target.
    pub fn new(dead_zone: f32) -> Self {
        Self {
            target_x: None,
            dead_zone,
        }
    }

    /// Track the pointer at `client_x` within a viewport `width` pixels wide
    pub fn pointer_moved(&mut self, client_x: f32, width: f32) {
        if width <= 0.0 {
            return;
        }
        let fraction = (client_x / width).clamp(0.0, 1.0);
        self.target_x = Some(PLAYER_MIN_X + fraction * (PLAYER_MAX_X - PLAYER_MIN_X));
    }

    pub fn pointer_left(&mut self) {
        self.target_x = None;
    }

    pub fn target_x(&self) -> Option<f32> {
        self.target_x
    }
}

impl InputSource for PointerSteering {
    fn sample(&self, player_pos: Vec2) -> DirectionalInput {
        let Some(target) = self.target_x else {
            return DirectionalInput::NONE;
        };
        let dx = target - player_pos.x;
        DirectionalInput {
            left: dx < -self.dead_zone,
            right: dx > self.dead_zone,
            ..DirectionalInput::NONE
        }
    }
}

/// Keyboard and pointer together, either may steer
pub struct CombinedInput<'a> {
    pub keys: &'a KeyState,
    pub pointer: &'a PointerSteering,
}

impl InputSource for CombinedInput<'_> {
    fn sample(&self, player_pos: Vec2) -> DirectionalInput {
        self.keys
            .sample(player_pos)
            .merge(self.pointer.sample(player_pos))
    }
}
