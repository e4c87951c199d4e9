//! Background starfield (visual only, never touches gameplay)

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{STAR_HALF_HEIGHT, STAR_HALF_WIDTH, STAR_WRAP_Y};

/// Salt so the starfield stream never mirrors the gameplay stream
const STARFIELD_SEED_SALT: u64 = 0x5eed_57a2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec3,
    pub size: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed ^ STARFIELD_SEED_SALT);
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec3::new(
                    rng.random_range(-STAR_HALF_WIDTH..STAR_HALF_WIDTH),
                    rng.random_range(-STAR_HALF_HEIGHT..STAR_HALF_HEIGHT),
                    -2.0 - rng.random_range(0.0..4.0),
                ),
                size: 0.03 + rng.random_range(0.0..0.04),
                opacity: 0.3 + rng.random_range(0.0..0.7),
            })
            .collect();
        Self { stars, rng }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Drift every star down; stars leaving the bottom re-enter at the top
    pub fn advance(&mut self) {
        for star in &mut self.stars {
            star.pos.y -= 0.01 + self.rng.random_range(0.0..0.01);
            if star.pos.y < -STAR_WRAP_Y {
                star.pos.y = STAR_WRAP_Y;
                star.pos.x = self.rng.random_range(-STAR_HALF_WIDTH..STAR_HALF_WIDTH);
            }
        }
    }
}
