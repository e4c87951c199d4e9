//! One play-through: player, obstacles, progression and RNG in a single owner

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::obstacle::ObstacleField;
use super::player::Player;
use super::progression::ProgressionController;
use super::starfield::Starfield;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Complete state of a run. Restarting builds a new `Session`; nothing is
/// carried over from the old one.
#[derive(Debug, Clone)]
pub struct Session {
    pub seed: u64,
    pub config: GameConfig,
    pub player: Player,
    pub field: ObstacleField,
    pub progression: ProgressionController,
    pub starfield: Starfield,
    /// Frames simulated so far
    pub frame_count: u64,
    rng: Pcg32,
}

impl Session {
    /// Build a fresh session. Invalid configs are rejected here, before any
    /// frame runs.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let progression = ProgressionController::new(&config);
        let mut field = ObstacleField::new(
            progression.fall_speed(),
            progression.spawn_interval(),
            config.fall_speed_policy,
        );
        progression.apply_difficulty(&mut field);

        Ok(Self {
            seed,
            player: Player::new(config.player_step),
            field,
            progression,
            starfield: Starfield::new(config.star_count, seed),
            frame_count: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
        })
    }

    pub fn is_over(&self) -> bool {
        self.progression.is_game_over()
    }

    /// Gameplay RNG, split borrow alongside the field
    pub(crate) fn field_and_rng(&mut self) -> (&mut ObstacleField, &mut Pcg32) {
        (&mut self.field, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_START_Y;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(GameConfig::default(), 5).unwrap();
        assert_eq!(session.progression.score(), 0);
        assert_eq!(session.progression.level(), 1);
        assert_eq!(session.progression.lives(), 5);
        assert_eq!(session.player.pos.y, PLAYER_START_Y);
        assert!(session.field.is_empty());
        assert_eq!(session.starfield.stars().len(), 120);
        assert!(!session.is_over());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GameConfig {
            level_up_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(config, 1),
            Err(ConfigError::ZeroLevelUpThreshold)
        ));
    }
}
