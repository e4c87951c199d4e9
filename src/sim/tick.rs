//! Frame-driven simulation step
//!
//! Advances a session by one rendered frame in a fixed order. Obstacles
//! spawned during a frame are not collision-checked until the next one.

use std::time::Duration;

use super::collision::player_hit;
use super::input::DirectionalInput;
use super::progression::{GameEvent, HitOutcome};
use super::session::Session;

/// What happened during one frame
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// Collision outcome, if the player was hit
    pub hit: Option<HitOutcome>,
    pub spawned: usize,
    pub evicted: usize,
}

/// Advance the session by one frame that took `dt` of wall time
pub fn tick(session: &mut Session, input: &DirectionalInput, dt: Duration) -> TickReport {
    let mut report = TickReport::default();
    if session.is_over() {
        return report;
    }

    // Let the invulnerability window lapse before this frame's collision check
    session
        .progression
        .advance_timers(dt, &mut session.player, &mut report.events);

    session.player.move_by(input);
    report.evicted = session.field.advance();

    if !session.progression.is_invulnerable()
        && player_hit(
            session.player.pos,
            session.field.obstacles(),
            session.config.collision_radius,
        )
    {
        let outcome = session
            .progression
            .register_hit(&mut session.player, &mut report.events);
        report.hit = Some(outcome);
        if outcome == HitOutcome::GameOver {
            session.field.stop_spawning();
        }
    }

    session.frame_count += 1;
    if session.frame_count % u64::from(session.config.frames_per_point) == 0 {
        session
            .progression
            .tick(&mut session.field, &mut report.events);
    }

    let (field, rng) = session.field_and_rng();
    report.spawned = field.run_spawn_timer(dt, rng);

    session.starfield.advance();
    report
}
