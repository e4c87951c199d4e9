//! Platform abstraction layer
//!
//! Seams for the collaborators the game loop notifies:
//! - HUD / menus (score line, pause menu, game-over screen)
//! - Background music
//!
//! Both are fire-and-forget; nothing they do can fail the simulation.

use crate::hud_line;

/// Receives HUD-relevant state changes
pub trait HudListener {
    fn on_score_changed(&mut self, _score: u32, _level: u32, _lives: u8) {}
    fn on_level_up(&mut self, _level: u32) {}
    fn on_pause_requested(&mut self) {}
    fn on_game_over(&mut self, _score: u32, _level: u32) {}
}

/// Background music control
pub trait MusicPlayer {
    fn play_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Collaborator that ignores everything
#[derive(Debug, Default)]
pub struct Silent;

impl HudListener for Silent {}
impl MusicPlayer for Silent {}

/// HUD that writes every change to the log (native builds)
#[derive(Debug, Default)]
pub struct LogHud {
    last_line: String,
}

impl LogHud {
    pub fn last_line(&self) -> &str {
        &self.last_line
    }
}

impl HudListener for LogHud {
    fn on_score_changed(&mut self, score: u32, level: u32, lives: u8) {
        let line = hud_line(score, level, lives);
        if line != self.last_line {
            log::debug!("{}", line);
            self.last_line = line;
        }
    }

    fn on_level_up(&mut self, level: u32) {
        log::info!("Level up! Now at level {}", level);
    }

    fn on_pause_requested(&mut self) {
        log::info!("Paused");
    }

    fn on_game_over(&mut self, score: u32, level: u32) {
        log::info!("Game over! Score: {} Level: {}", score, level);
    }
}

/// Music player that only logs (native builds have no audio backend)
#[derive(Debug, Default)]
pub struct LogMusic {
    pub playing: bool,
}

impl MusicPlayer for LogMusic {
    fn play_music(&mut self) {
        self.playing = true;
        log::debug!("Music: play");
    }

    fn pause_music(&mut self) {
        self.playing = false;
        log::debug!("Music: pause");
    }

    fn stop_music(&mut self) {
        self.playing = false;
        log::debug!("Music: stop");
    }
}
