//! Falling obstacles and the field that spawns, advances and evicts them

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::timer::Timer;
use crate::config::FallSpeedPolicy;
use crate::consts::*;

/// Obstacle shape category, escalating with level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Tier1, Tier::Tier2, Tier::Tier3, Tier::Tier4];
}

/// Level at and above which several tiers spawn at once
pub const MULTI_SPAWN_LEVEL: u32 = 10;

/// Shape tier for a single spawn at `level`
pub fn tier_for_level(level: u32) -> Tier {
    match level {
        0..=2 => Tier::Tier1,
        3..=4 => Tier::Tier2,
        5..=7 => Tier::Tier3,
        _ => Tier::Tier4,
    }
}

/// How many obstacles one spawn produces: 1 below the multi-spawn level,
/// otherwise 2 or 3
pub fn spawn_count_for_level(level: u32, rng: &mut impl Rng) -> usize {
    if level < MULTI_SPAWN_LEVEL {
        1
    } else {
        rng.random_range(2..=3)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub tier: Tier,
    /// Units per tick, fixed when spawned
    pub fall_speed: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2, tier: Tier, fall_speed: f32) -> Self {
        Self {
            pos,
            tier,
            fall_speed,
        }
    }

    pub fn is_out_of_play(&self) -> bool {
        self.pos.y < DESPAWN_Y
    }
}

/// All live obstacles plus the spawn schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    spawn_timer: Timer,
    /// Speed given to newly spawned obstacles
    fall_speed: f32,
    /// Level used to pick tiers for new spawns
    level: u32,
    policy: FallSpeedPolicy,
}

impl ObstacleField {
    pub fn new(fall_speed: f32, spawn_interval: Duration, policy: FallSpeedPolicy) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: Timer::repeating(spawn_interval),
            fall_speed,
            level: 1,
            policy,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn spawn_interval(&self) -> Duration {
        self.spawn_timer.period()
    }

    /// Insert an obstacle directly
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Spawn one wave of obstacles at the top of the play area.
    ///
    /// Multi-spawns pick distinct tiers, each at its own x.
    pub fn spawn(&mut self, rng: &mut impl Rng) -> usize {
        let count = spawn_count_for_level(self.level, rng);
        if count == 1 {
            let tier = tier_for_level(self.level);
            let pos = Vec2::new(rng.random_range(PLAYER_MIN_X..=PLAYER_MAX_X), SPAWN_Y);
            self.obstacles.push(Obstacle::new(pos, tier, self.fall_speed));
        } else {
            let mut tiers = Tier::ALL;
            tiers.shuffle(rng);
            for &tier in &tiers[..count] {
                let pos = Vec2::new(
                    rng.random_range(PLAYER_MIN_X..=PLAYER_MAX_X),
                    SPAWN_Y + rng.random_range(0.0..SPAWN_Y_JITTER),
                );
                self.obstacles.push(Obstacle::new(pos, tier, self.fall_speed));
            }
        }
        log::debug!(
            "Spawned {} obstacle(s) at level {} ({} live)",
            count,
            self.level,
            self.obstacles.len()
        );
        count
    }

    /// Advance the spawn schedule by `dt`, spawning for every expiration
    pub fn run_spawn_timer(&mut self, dt: Duration, rng: &mut impl Rng) -> usize {
        let fired = self.spawn_timer.advance(dt);
        (0..fired).map(|_| self.spawn(rng)).sum()
    }

    /// Move every obstacle down one tick and evict the ones that left play.
    ///
    /// Returns the number evicted.
    pub fn advance(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain_mut(|obstacle| {
            obstacle.pos.y -= obstacle.fall_speed;
            !obstacle.is_out_of_play()
        });
        before - self.obstacles.len()
    }

    /// Apply a new difficulty: spawn period and fall speed for future spawns.
    /// Time already counted toward the next spawn carries over to the new
    /// period. Existing obstacles only change under the live policy.
    pub fn set_difficulty(&mut self, fall_speed: f32, spawn_interval: Duration, level: u32) {
        self.fall_speed = fall_speed;
        self.level = level;
        if self.policy == FallSpeedPolicy::Live {
            for obstacle in &mut self.obstacles {
                obstacle.fall_speed = fall_speed;
            }
        }
        self.spawn_timer.retime(spawn_interval);
    }

    /// Stop spawning (session over)
    pub fn stop_spawning(&mut self) {
        self.spawn_timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn field() -> ObstacleField {
        ObstacleField::new(0.05, Duration::from_millis(2000), FallSpeedPolicy::SpawnTime)
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier_for_level(1), Tier::Tier1);
        assert_eq!(tier_for_level(2), Tier::Tier1);
        assert_eq!(tier_for_level(3), Tier::Tier2);
        assert_eq!(tier_for_level(4), Tier::Tier2);
        assert_eq!(tier_for_level(5), Tier::Tier3);
        assert_eq!(tier_for_level(7), Tier::Tier3);
        assert_eq!(tier_for_level(8), Tier::Tier4);
        assert_eq!(tier_for_level(9), Tier::Tier4);
    }

    #[test]
    fn test_spawn_count_escalates() {
        let mut rng = Pcg32::seed_from_u64(1);
        for level in 1..MULTI_SPAWN_LEVEL {
            assert_eq!(spawn_count_for_level(level, &mut rng), 1);
        }
        for _ in 0..50 {
            let count = spawn_count_for_level(12, &mut rng);
            assert!((2..=3).contains(&count));
        }
    }

    #[test]
    fn test_single_spawn_uses_level_tier_and_speed() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut field = field();
        field.set_difficulty(0.08, Duration::from_millis(1600), 4);
        assert_eq!(field.spawn(&mut rng), 1);

        let obstacle = &field.obstacles()[0];
        assert_eq!(obstacle.tier, Tier::Tier2);
        assert_eq!(obstacle.fall_speed, 0.08);
        assert_eq!(obstacle.pos.y, SPAWN_Y);
        assert!(obstacle.pos.x >= PLAYER_MIN_X && obstacle.pos.x <= PLAYER_MAX_X);
    }

    #[test]
    fn test_multi_spawn_has_distinct_tiers() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let mut field = field();
            field.set_difficulty(0.2, Duration::from_millis(600), 11);
            let count = field.spawn(&mut rng);
            assert_eq!(count, field.len());

            let tiers: HashSet<_> = field.obstacles().iter().map(|o| o.tier).collect();
            assert_eq!(tiers.len(), count, "tiers must not repeat within one spawn");
            for obstacle in field.obstacles() {
                assert!(obstacle.pos.y >= SPAWN_Y && obstacle.pos.y < SPAWN_Y + SPAWN_Y_JITTER);
            }
        }
    }

    #[test]
    fn test_advance_evicts_in_same_call() {
        let mut field = field();
        field.push(Obstacle::new(Vec2::new(0.0, -4.96), Tier::Tier1, 0.05));
        field.push(Obstacle::new(Vec2::new(1.0, -4.98), Tier::Tier1, 0.05));
        field.push(Obstacle::new(Vec2::new(2.0, -4.90), Tier::Tier1, 0.05));
        field.push(Obstacle::new(Vec2::new(-1.0, 3.0), Tier::Tier1, 0.05));

        assert_eq!(field.advance(), 2);
        assert_eq!(field.len(), 2);
        assert!(field.obstacles().iter().all(|o| o.pos.y >= DESPAWN_Y));
        // Survivors keep their relative order
        assert_eq!(field.obstacles()[0].pos.x, 2.0);
        assert_eq!(field.obstacles()[1].pos.x, -1.0);
    }

    #[test]
    fn test_adjacent_evictions_are_not_skipped() {
        let mut field = field();
        for i in 0..6 {
            field.push(Obstacle::new(Vec2::new(i as f32 * 0.5 - 1.5, -4.99), Tier::Tier1, 0.05));
        }
        assert_eq!(field.advance(), 6);
        assert!(field.is_empty());
    }

    #[test]
    fn test_spawn_time_policy_keeps_existing_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = field();
        field.spawn(&mut rng);
        field.set_difficulty(0.065, Duration::from_millis(1800), 2);
        field.spawn(&mut rng);

        assert_eq!(field.obstacles()[0].fall_speed, 0.05);
        assert_eq!(field.obstacles()[1].fall_speed, 0.065);
    }

    #[test]
    fn test_live_policy_updates_existing_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field =
            ObstacleField::new(0.05, Duration::from_millis(2000), FallSpeedPolicy::Live);
        field.spawn(&mut rng);
        field.set_difficulty(0.065, Duration::from_millis(1800), 2);
        assert_eq!(field.obstacles()[0].fall_speed, 0.065);
    }

    #[test]
    fn test_spawn_timer_follows_difficulty() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = field();
        assert_eq!(field.run_spawn_timer(Duration::from_millis(1999), &mut rng), 0);
        assert_eq!(field.run_spawn_timer(Duration::from_millis(1), &mut rng), 1);

        // New period applies from the last spawn
        field.set_difficulty(0.065, Duration::from_millis(600), 2);
        assert_eq!(field.spawn_interval(), Duration::from_millis(600));
        assert_eq!(field.run_spawn_timer(Duration::from_millis(1800), &mut rng), 3);
        assert_eq!(field.len(), 4);

        field.stop_spawning();
        assert_eq!(field.run_spawn_timer(Duration::from_secs(60), &mut rng), 0);
    }

    #[test]
    fn test_frequent_level_ups_still_spawn() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut floored =
            ObstacleField::new(0.05, Duration::from_millis(600), FallSpeedPolicy::SpawnTime);

        // A level-up every 150ms, each at the floor interval
        let mut spawned = 0;
        for level in 2..=9 {
            floored.set_difficulty(0.05, Duration::from_millis(600), level);
            spawned += floored.run_spawn_timer(Duration::from_millis(150), &mut rng);
        }
        assert_eq!(spawned, 2);

        // Shrinking below the elapsed time fires on the next advance
        let mut field = field();
        field.run_spawn_timer(Duration::from_millis(1500), &mut rng);
        field.set_difficulty(0.065, Duration::from_millis(1000), 2);
        assert_eq!(field.run_spawn_timer(Duration::ZERO, &mut rng), 1);
    }
}
