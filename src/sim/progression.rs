//! Score, level, lives and the damage/invulnerability state machine

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleField;
use super::player::Player;
use super::timer::{Timer, TimerMode};
use crate::config::GameConfig;

/// Damage state of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionState {
    /// Collisions are checked and cost a life
    Active,
    /// Recently hit; collisions are not checked at all
    Invulnerable,
    /// Out of lives
    GameOver,
}

/// Something the HUD or audio should hear about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u32, level: u32, lives: u8 },
    LevelUp {
        level: u32,
        fall_speed: f32,
        spawn_interval_ms: u64,
    },
    LifeLost { lives: u8 },
    InvulnerabilityEnded,
    GameOver { score: u32, level: u32 },
}

/// Result of reporting a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Not in a state that takes damage
    Ignored,
    /// Lost a life, now invulnerable
    Damaged { lives: u8 },
    /// Lost the last life
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionController {
    state: ProgressionState,
    score: u32,
    level: u32,
    lives: u8,
    fall_speed: f32,
    spawn_interval: Duration,
    invulnerability: Timer,
    blink: Timer,

    level_up_threshold: u32,
    fall_speed_step: f32,
    spawn_interval_step: Duration,
    min_spawn_interval: Duration,
    invulnerability_window: Duration,
    blink_interval: Duration,
}

impl ProgressionController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: ProgressionState::Active,
            score: 0,
            level: 1,
            lives: config.initial_lives,
            fall_speed: config.initial_fall_speed,
            spawn_interval: config.initial_spawn_interval(),
            invulnerability: Timer::new(config.invulnerability(), TimerMode::Once),
            blink: Timer::new(config.blink_interval(), TimerMode::Repeating),

            level_up_threshold: config.level_up_threshold,
            fall_speed_step: config.fall_speed_step,
            spawn_interval_step: Duration::from_millis(config.spawn_interval_step_ms),
            min_spawn_interval: Duration::from_millis(config.min_spawn_interval_ms),
            invulnerability_window: config.invulnerability(),
            blink_interval: config.blink_interval(),
        }
    }

    pub fn state(&self) -> ProgressionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    pub fn is_invulnerable(&self) -> bool {
        self.state == ProgressionState::Invulnerable
    }

    pub fn is_game_over(&self) -> bool {
        self.state == ProgressionState::GameOver
    }

    /// Time left in the current invulnerability window
    pub fn invulnerability_remaining(&self) -> Duration {
        self.invulnerability.remaining()
    }

    /// Snapshot for the HUD
    pub fn score_event(&self) -> GameEvent {
        GameEvent::ScoreChanged {
            score: self.score,
            level: self.level,
            lives: self.lives,
        }
    }

    /// Push the current difficulty to the obstacle field
    pub fn apply_difficulty(&self, field: &mut ObstacleField) {
        field.set_difficulty(self.fall_speed, self.spawn_interval, self.level);
    }

    /// One score interval elapsed: award a point and check for a level-up
    pub fn tick(&mut self, field: &mut ObstacleField, events: &mut Vec<GameEvent>) {
        if self.is_game_over() {
            return;
        }
        self.score += 1;
        events.push(self.score_event());
        self.check_level_up(field, events);
    }

    /// Level up if the score has reached the next threshold.
    ///
    /// The target level is derived from the score, so calling this again at
    /// the same score does nothing.
    pub fn check_level_up(&mut self, field: &mut ObstacleField, events: &mut Vec<GameEvent>) -> bool {
        let earned = 1 + self.score / self.level_up_threshold;
        if earned <= self.level {
            return false;
        }

        self.level += 1;
        self.fall_speed += self.fall_speed_step;
        self.spawn_interval = self
            .spawn_interval
            .saturating_sub(self.spawn_interval_step)
            .max(self.min_spawn_interval);
        self.apply_difficulty(field);

        log::debug!(
            "Level {} reached: fall speed {:.3}, spawn every {}ms",
            self.level,
            self.fall_speed,
            self.spawn_interval.as_millis()
        );
        events.push(GameEvent::LevelUp {
            level: self.level,
            fall_speed: self.fall_speed,
            spawn_interval_ms: self.spawn_interval.as_millis() as u64,
        });
        events.push(self.score_event());
        true
    }

    /// Report a collision with the player
    pub fn register_hit(&mut self, player: &mut Player, events: &mut Vec<GameEvent>) -> HitOutcome {
        if self.state != ProgressionState::Active {
            return HitOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost { lives: self.lives });
        events.push(self.score_event());

        if self.lives == 0 {
            self.state = ProgressionState::GameOver;
            self.invulnerability.cancel();
            self.blink.cancel();
            player.set_visible(true);
            log::info!("Game over at score {} (level {})", self.score, self.level);
            events.push(GameEvent::GameOver {
                score: self.score,
                level: self.level,
            });
            HitOutcome::GameOver
        } else {
            log::info!("Hit! {} lives left", self.lives);
            self.start_invulnerability(player);
            HitOutcome::Damaged { lives: self.lives }
        }
    }

    /// Begin (or restart) the invulnerability window and blink cadence.
    pub fn start_invulnerability(&mut self, player: &mut Player) {
        if self.is_game_over() {
            return;
        }
        self.state = ProgressionState::Invulnerable;
        self.invulnerability.schedule(self.invulnerability_window);
        self.blink.schedule(self.blink_interval);
        player.set_visible(true);
    }

    /// Run the invulnerability and blink timers for `dt` of simulated time
    pub fn advance_timers(&mut self, dt: Duration, player: &mut Player, events: &mut Vec<GameEvent>) {
        if self.state != ProgressionState::Invulnerable {
            return;
        }

        let toggles = self.blink.advance(dt);
        if toggles % 2 == 1 {
            player.set_visible(!player.visible);
        }

        if self.invulnerability.advance(dt) > 0 {
            self.blink.cancel();
            player.set_visible(true);
            self.state = ProgressionState::Active;
            events.push(GameEvent::InvulnerabilityEnded);
        }
    }
}
