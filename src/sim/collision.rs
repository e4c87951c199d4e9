//! Player vs obstacle collision detection
//!
//! Shapes are ignored: both entities are treated as points and a hit is any
//! center distance under a fixed radius.

use glam::Vec2;

use super::obstacle::Obstacle;

/// True if any obstacle's center lies strictly within `radius` of the player.
///
/// Only the x/y plane is considered. Stops at the first hit.
pub fn player_hit(player_pos: Vec2, obstacles: &[Obstacle], radius: f32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| player_pos.distance(obstacle.pos) < radius)
}

/// The obstacle nearest to the player, with its distance (for debug overlays)
pub fn nearest_obstacle(player_pos: Vec2, obstacles: &[Obstacle]) -> Option<(&Obstacle, f32)> {
    obstacles
        .iter()
        .map(|obstacle| (obstacle, player_pos.distance(obstacle.pos)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Tier;
    use proptest::prelude::*;

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle::new(Vec2::new(x, y), Tier::Tier1, 0.05)
    }

    #[test]
    fn test_threshold_is_strict() {
        let player = Vec2::new(0.0, -2.0);
        assert!(player_hit(player, &[obstacle_at(0.49, -2.0)], 0.5));
        assert!(!player_hit(player, &[obstacle_at(0.51, -2.0)], 0.5));
        assert!(!player_hit(player, &[obstacle_at(0.0, -1.49)], 0.5));
    }

    #[test]
    fn test_any_obstacle_counts() {
        let player = Vec2::ZERO;
        let field = [obstacle_at(2.0, 2.0), obstacle_at(-1.0, 3.0), obstacle_at(0.3, 0.3)];
        assert!(player_hit(player, &field, 0.5));
        assert!(!player_hit(player, &field[..2], 0.5));
        assert!(!player_hit(player, &[], 0.5));
    }

    #[test]
    fn test_nearest_obstacle() {
        let field = [obstacle_at(2.0, 0.0), obstacle_at(0.0, 1.0)];
        let (nearest, dist) = nearest_obstacle(Vec2::ZERO, &field).unwrap();
        assert_eq!(nearest.pos, Vec2::new(0.0, 1.0));
        assert!((dist - 1.0).abs() < 1e-6);
        assert!(nearest_obstacle(Vec2::ZERO, &[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_hit_matches_distance(
            px in -3.0f32..3.0, py in -4.0f32..4.0,
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.0f32..1.0,
        ) {
            // Stay clear of the boundary where float rounding could flip the result
            prop_assume!((dist - 0.5).abs() > 1e-3);
            let player = Vec2::new(px, py);
            let offset = Vec2::new(angle.cos(), angle.sin()) * dist;
            let obstacle = Obstacle::new(player + offset, Tier::Tier2, 0.05);
            prop_assert_eq!(player_hit(player, &[obstacle], 0.5), dist < 0.5);
        }
    }
}
