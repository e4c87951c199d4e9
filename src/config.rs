//! Game balance configuration
//!
//! Every tuning constant the simulation reads lives here so that variants of
//! the game are a config change rather than a code change.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVES;
use crate::error::ConfigError;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    /// Level up every 20 points
    #[default]
    Classic,
    /// Level up every 50 points
    Marathon,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Classic => "Classic",
            DifficultyPreset::Marathon => "Marathon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(DifficultyPreset::Classic),
            "marathon" | "long" => Some(DifficultyPreset::Marathon),
            _ => None,
        }
    }

    /// Score points between level-ups for this preset
    pub fn level_up_threshold(&self) -> u32 {
        match self {
            DifficultyPreset::Classic => 20,
            DifficultyPreset::Marathon => 50,
        }
    }
}

/// Whether a level-up changes the speed of obstacles already falling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FallSpeedPolicy {
    /// Obstacles keep the speed they were spawned with
    #[default]
    SpawnTime,
    /// Every live obstacle picks up the new speed immediately
    Live,
}

/// Game balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Preset this config was derived from (informational)
    pub preset: DifficultyPreset,

    // === Progression ===
    /// Score points per level
    pub level_up_threshold: u32,
    /// Frames per score point
    pub frames_per_point: u32,
    /// Lives at session start
    pub initial_lives: u8,

    // === Obstacles ===
    /// Fall speed at level 1 (units per frame)
    pub initial_fall_speed: f32,
    /// Fall speed added per level
    pub fall_speed_step: f32,
    /// Spawn period at level 1
    pub initial_spawn_interval_ms: u64,
    /// Spawn period removed per level
    pub spawn_interval_step_ms: u64,
    /// Spawn period never drops below this
    pub min_spawn_interval_ms: u64,
    pub fall_speed_policy: FallSpeedPolicy,

    // === Player ===
    /// Movement per frame per pressed direction
    pub player_step: f32,
    /// Center distance below which player and obstacle collide
    pub collision_radius: f32,

    // === Damage feedback ===
    pub invulnerability_ms: u64,
    pub blink_interval_ms: u64,

    // === Background ===
    pub star_count: usize,

    /// Fixed RNG seed; `None` lets the host choose one
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            preset: DifficultyPreset::Classic,

            level_up_threshold: 20,
            frames_per_point: 10,
            initial_lives: MAX_LIVES,

            initial_fall_speed: 0.05,
            fall_speed_step: 0.015,
            initial_spawn_interval_ms: 2000,
            spawn_interval_step_ms: 200,
            min_spawn_interval_ms: 600,
            fall_speed_policy: FallSpeedPolicy::SpawnTime,

            player_step: 0.1,
            collision_radius: 0.5,

            invulnerability_ms: 1500,
            blink_interval_ms: 150,

            star_count: 120,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a config from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a difficulty preset (updates preset-dependent values)
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.preset = preset;
        self.level_up_threshold = preset.level_up_threshold();
    }

    /// Parse a config from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level_up_threshold == 0 {
            return Err(ConfigError::ZeroLevelUpThreshold);
        }
        if self.frames_per_point == 0 {
            return Err(ConfigError::ZeroScoreInterval);
        }
        if self.initial_lives == 0 || self.initial_lives > MAX_LIVES {
            return Err(ConfigError::LivesOutOfRange {
                lives: self.initial_lives,
                max: MAX_LIVES,
            });
        }

        let positive = [
            ("initial_fall_speed", self.initial_fall_speed),
            ("player_step", self.player_step),
            ("collision_radius", self.collision_radius),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive {
                    field,
                    value: f64::from(value),
                });
            }
        }
        if !(self.fall_speed_step.is_finite() && self.fall_speed_step >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "fall_speed_step",
                value: f64::from(self.fall_speed_step),
            });
        }

        let durations = [
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("invulnerability_ms", self.invulnerability_ms),
            ("blink_interval_ms", self.blink_interval_ms),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(ConfigError::NonPositive { field, value: 0.0 });
            }
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return Err(ConfigError::SpawnFloorAboveInitial {
                min_ms: self.min_spawn_interval_ms,
                initial_ms: self.initial_spawn_interval_ms,
            });
        }
        if self.blink_interval_ms > self.invulnerability_ms {
            return Err(ConfigError::BlinkLongerThanWindow {
                blink_ms: self.blink_interval_ms,
                window_ms: self.invulnerability_ms,
            });
        }
        Ok(())
    }

    pub fn initial_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.initial_spawn_interval_ms)
    }

    pub fn invulnerability(&self) -> Duration {
        Duration::from_millis(self.invulnerability_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::from_preset(DifficultyPreset::Marathon).validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(GameConfig::default().level_up_threshold, 20);
        assert_eq!(
            GameConfig::from_preset(DifficultyPreset::Marathon).level_up_threshold,
            50
        );
        assert_eq!(DifficultyPreset::from_str("MARATHON"), Some(DifficultyPreset::Marathon));
        assert_eq!(DifficultyPreset::from_str("nightmare"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "level_up_threshold": 50, "seed": 7 }"#).unwrap();
        assert_eq!(config.level_up_threshold, 50);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_spawn_interval_ms, 2000);
        assert_eq!(config.fall_speed_policy, FallSpeedPolicy::SpawnTime);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = GameConfig::from_json(r#"{ "level_up_threshold": -20 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_failures() {
        let config = GameConfig {
            level_up_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroLevelUpThreshold)));

        let config = GameConfig {
            initial_lives: 6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LivesOutOfRange { lives: 6, .. })
        ));

        let config = GameConfig {
            min_spawn_interval_ms: 2500,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnFloorAboveInitial { .. })
        ));

        let config = GameConfig {
            collision_radius: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "collision_radius", .. })
        ));

        let config = GameConfig {
            blink_interval_ms: 2000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BlinkLongerThanWindow { .. })
        ));
    }
}
