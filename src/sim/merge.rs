//! Merging two compatible balls into one of the next tier

use glam::Vec2;

use super::collision::resolve_walls;
use super::state::{Ball, GameEvent, GameState, MotionState};
use crate::config::SimConfig;

/// Combine `mover` with `target`, producing a ball one tier up.
///
/// The result sits at the midpoint, grows from `target`'s radius and is
/// given a small downward velocity so it keeps settling.
pub fn merged_ball(id: u32, mover: &Ball, target: &Ball, cfg: &SimConfig) -> Ball {
    Ball {
        id,
        pos: (mover.pos + target.pos) * 0.5,
        vel: Vec2::new(0.0, cfg.merge_seed_velocity),
        radius: target.radius * cfg.merge_growth,
        tier: target.tier.next(),
        motion: MotionState::Falling,
    }
}

/// Points awarded for producing a ball of `radius`
#[inline]
pub fn merge_points(radius: f32) -> u64 {
    radius.round() as u64
}

impl GameState {
    /// Consume `mover` (no longer stored anywhere) and the resting-set member
    /// at `target_index`, append the merged ball, and score it.
    ///
    /// Returns the merged ball's id.
    pub fn merge_into(&mut self, mover: Ball, target_index: usize) -> u32 {
        let target = self.resting.remove(target_index);
        let id = self.next_entity_id();
        let mut merged = merged_ball(id, &mover, &target, &self.config);
        // A grown ball near a wall may poke out of the play area
        resolve_walls(&mut merged, &self.config);
        let points = merge_points(merged.radius);
        self.score += points;

        log::debug!(
            "Merged {} + {} into {} (tier {}, r={:.1}, +{} points)",
            mover.id,
            target.id,
            id,
            merged.tier.index(),
            merged.radius,
            points
        );
        self.events.push(GameEvent::Merged {
            consumed: [mover.id, target.id],
            into: id,
            tier: merged.tier,
            points,
        });
        self.resting.push(merged);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Tier;

    #[test]
    fn test_merged_ball_shape() {
        let cfg = SimConfig::default();
        let mover = Ball::new(1, Tier::MIN, Vec2::new(200.0, 546.0));
        let target = Ball::new(2, Tier::MIN, Vec2::new(204.0, 582.0));
        let merged = merged_ball(3, &mover, &target, &cfg);

        assert_eq!(merged.pos, Vec2::new(202.0, 564.0));
        assert_eq!(merged.vel, Vec2::new(0.0, 0.5));
        assert_eq!(merged.radius, 22.5);
        assert_eq!(merged.tier, Tier::new(1).unwrap());
        assert_eq!(merged.motion, MotionState::Falling);
    }

    #[test]
    fn test_top_tier_wraps() {
        let cfg = SimConfig::default();
        let mover = Ball::new(1, Tier::MAX, Vec2::new(200.0, 450.0));
        let target = Ball::new(2, Tier::MAX, Vec2::new(200.0, 550.0));
        let merged = merged_ball(3, &mover, &target, &cfg);
        assert_eq!(merged.tier, Tier::MIN);
        assert_eq!(merged.radius, 62.5);
    }

    #[test]
    fn test_merge_into_updates_state() {
        let mut state = GameState::new(SimConfig::default(), 9);
        state.place(Tier::new(2).unwrap(), Vec2::new(100.0, 574.0), MotionState::Resting);
        let target_id = state.place(Tier::MIN, Vec2::new(200.0, 582.0), MotionState::Resting);
        let mover = Ball::new(state.next_entity_id(), Tier::MIN, Vec2::new(200.0, 546.0));

        let id = state.merge_into(mover, 1);

        assert_eq!(state.resting.len(), 2);
        assert!(state.resting_index(target_id).is_none());
        assert_eq!(state.resting[1].id, id);
        assert_eq!(state.score, 23);
        assert_eq!(
            state.events,
            vec![GameEvent::Merged {
                consumed: [mover.id, target_id],
                into: id,
                tier: Tier::new(1).unwrap(),
                points: 23,
            }]
        );
    }

    #[test]
    fn test_merge_at_wall_stays_inside() {
        let mut state = GameState::new(SimConfig::default(), 9);
        state.place(Tier::MIN, Vec2::new(18.0, 582.0), MotionState::Resting);
        let mover = Ball::new(state.next_entity_id(), Tier::MIN, Vec2::new(18.0, 546.0));

        state.merge_into(mover, 0);

        assert_eq!(state.resting[0].pos.x, 22.5);
    }

    #[test]
    fn test_points_round_half_up() {
        assert_eq!(merge_points(22.5), 23);
        assert_eq!(merge_points(27.5), 28);
        assert_eq!(merge_points(40.0), 40);
    }
}
