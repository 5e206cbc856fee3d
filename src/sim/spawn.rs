//! Spawn weighting and new-ball creation

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, GameEvent, GameState, Tier};
use crate::consts::TIER_BANDS;

/// Map a uniform draw in `[0, 1]` onto a tier.
///
/// Bands: 50% / 25% / 12% / 7% / 4% / 2%. A draw of exactly 1.0 is tier 5.
pub fn tier_for_roll(roll: f64) -> Tier {
    debug_assert!((0.0..=1.0).contains(&roll), "roll {roll} outside [0, 1]");
    let index = TIER_BANDS
        .iter()
        .position(|&upper| roll < upper)
        .unwrap_or(TIER_BANDS.len());
    Tier::new(index as u8).unwrap_or(Tier::MAX)
}

/// Draw a weighted tier
pub fn roll_tier<R: Rng>(rng: &mut R) -> Tier {
    tier_for_roll(rng.random::<f64>())
}

/// A new falling ball at the top centre, its top edge touching the ceiling
pub fn spawn_ball(id: u32, tier: Tier, width: f32) -> Ball {
    let radius = tier.spawn_radius();
    Ball::new(id, tier, Vec2::new(width / 2.0, radius))
}

impl GameState {
    /// Spawn a weighted-random ball as the active ball
    pub fn spawn_active(&mut self) {
        debug_assert!(self.active.is_none(), "spawn with a ball already in flight");
        let tier = roll_tier(&mut self.rng);
        let id = self.next_entity_id();
        let ball = spawn_ball(id, tier, self.config.width);
        log::debug!("Spawned ball {} (tier {})", id, tier.index());
        self.events.push(GameEvent::Spawned { id, tier });
        self.active = Some(ball);
    }

    /// A new ball may only appear once nothing is in flight
    pub fn ready_to_spawn(&self) -> bool {
        !self.is_game_over() && self.active.is_none() && !self.has_movers()
    }
}
