//! Rendering seam
//!
//! The scene graph lives outside this crate. Each frame the loop hands the
//! renderer a borrowed snapshot of everything it needs to draw.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Obstacle, Session, Star};

/// Which player visuals are available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlayerSkin {
    /// Ship texture loaded
    #[default]
    Textured,
    /// Texture failed to load; draw a flat-shaded ship instead
    Fallback,
}

/// Everything drawn in one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub player_pos: Vec2,
    pub player_visible: bool,
    pub skin: PlayerSkin,
    pub obstacles: &'a [Obstacle],
    pub stars: &'a [Star],
    pub score: u32,
    pub level: u32,
    pub lives: u8,
}

impl<'a> FrameSnapshot<'a> {
    pub fn capture(session: &'a Session, skin: PlayerSkin) -> Self {
        Self {
            player_pos: session.player.pos,
            player_visible: session.player.visible,
            skin,
            obstacles: session.field.obstacles(),
            stars: session.starfield.stars(),
            score: session.progression.score(),
            level: session.progression.level(),
            lives: session.progression.lives(),
        }
    }
}

/// The draw-frame collaborator
pub trait Renderer {
    fn render_frame(&mut self, frame: &FrameSnapshot<'_>);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_frame(&mut self, _frame: &FrameSnapshot<'_>) {}
}
