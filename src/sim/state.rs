//! Game state and core simulation types
//!
//! `GameState` is owned by a single controller and mutated only by `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::consts::*;
use crate::error::SimError;

/// Distance slack when deciding two circles touch
pub const CONTACT_EPSILON: f32 = 0.5;
/// Float slack on the horizontal bounds check
pub const BOUNDS_EPSILON: f32 = 1e-3;

/// Size/rarity class of a ball, always in `[0, TIER_COUNT)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const MIN: Tier = Tier(0);
    pub const MAX: Tier = Tier(TIER_COUNT as u8 - 1);

    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < TIER_COUNT).then_some(Self(index))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Next tier up; the top tier wraps back to tier 0
    pub fn next(self) -> Self {
        Self(((self.0 as usize + 1) % TIER_COUNT) as u8)
    }

    /// Radius a freshly spawned ball of this tier gets
    pub fn spawn_radius(self) -> f32 {
        TIER_RADII[self.index()]
    }

    pub fn color(self) -> &'static str {
        TIER_COLORS[self.index()]
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::new(value).ok_or_else(|| format!("tier {value} out of range 0..{TIER_COUNT}"))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.0
    }
}

/// Ball motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// Under gravity, no support
    Falling,
    /// Landed off-centre and being nudged sideways; still under gravity
    Rolling,
    /// Settled and inert until disturbed
    Resting,
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Centre, origin top-left, y grows downward
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
    pub tier: Tier,
    pub motion: MotionState,
}

impl Ball {
    /// A stationary falling ball of the tier's spawn size
    pub fn new(id: u32, tier: Tier, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: tier.spawn_radius(),
            tier,
            motion: MotionState::Falling,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Falling or rolling balls take part in physics each tick
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion != MotionState::Resting
    }

    /// Same tier and radii within `tolerance` of `other`'s radius
    pub fn merge_eligible(&self, other: &Ball, tolerance: f32) -> bool {
        self.tier == other.tier && (self.radius - other.radius).abs() < other.radius * tolerance
    }

    /// Stacked in contact: mostly aligned and centres within the radii sum
    pub fn stacked_with(&self, other: &Ball, alignment: f32) -> bool {
        let reach = self.radius + other.radius;
        (self.pos.x - other.pos.x).abs() < reach * alignment
            && self.pos.distance(other.pos) <= reach + CONTACT_EPSILON
    }

    /// Stacked in contact with a partner that should have merged with it
    pub fn unmerged_contact(&self, other: &Ball, alignment: f32, tolerance: f32) -> bool {
        (self.merge_eligible(other, tolerance) || other.merge_eligible(self, tolerance))
            && self.stacked_with(other, alignment)
    }

    /// Gravity then integrate position
    pub fn integrate(&mut self, gravity: f32) {
        self.vel.y += gravity;
        self.pos += self.vel;
    }

    /// Transition: supported from below with no sideways drift
    pub fn settle(&mut self) {
        self.vel = Vec2::ZERO;
        self.motion = MotionState::Resting;
    }

    /// Transition: supported but off-centre, keep moving sideways
    pub fn roll(&mut self, vx: f32) {
        self.vel = Vec2::new(vx, 0.0);
        self.motion = MotionState::Rolling;
    }

    /// Transition: rolled off its support, now in free fall (keeps drift)
    pub fn lose_support(&mut self) {
        if self.motion == MotionState::Rolling {
            self.motion = MotionState::Falling;
        }
    }

    /// Settled enough to be treated as inert
    pub fn is_settled(&self, rest_speed: f32) -> bool {
        self.motion == MotionState::Resting && self.vel.y.abs() < rest_speed
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal: a resting ball poked above the play area
    GameOver,
}

/// Something that happened during a tick (for renderers/audio)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, tier: Tier },
    /// Active ball settled and joined the resting set
    Landed { id: u32 },
    Merged {
        consumed: [u32; 2],
        into: u32,
        tier: Tier,
        points: u64,
    },
    GameOver { score: u64 },
}

/// Read-only view handed to renderers after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub resting: Vec<Ball>,
    pub active: Option<Ball>,
    pub score: u64,
    pub game_over: bool,
    pub time_ticks: u64,
    pub events: Vec<GameEvent>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The ball under player control, if any
    pub active: Option<Ball>,
    /// Everything else, in insertion order; may hold post-merge movers
    pub resting: Vec<Ball>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Empty board, nothing spawned yet; the first tick spawns
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            active: None,
            resting: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Any resting-set ball still falling or rolling
    pub fn has_movers(&self) -> bool {
        self.resting.iter().any(Ball::is_moving)
    }

    pub fn resting_index(&self, id: u32) -> Option<usize> {
        self.resting.iter().position(|b| b.id == id)
    }

    /// Add a ball to the resting set with a fresh id (setup/testing helper)
    pub fn place(&mut self, tier: Tier, pos: Vec2, motion: MotionState) -> u32 {
        let id = self.next_entity_id();
        let mut ball = Ball::new(id, tier, pos);
        ball.motion = motion;
        self.resting.push(ball);
        id
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            resting: self.resting.clone(),
            active: self.active,
            score: self.score,
            game_over: self.is_game_over(),
            time_ticks: self.time_ticks,
            events: self.events.clone(),
        }
    }

    /// Developer check for internal corruption.
    ///
    /// Fails on a non-positive radius, a ball outside the horizontal bounds,
    /// or two settled, merge-eligible balls stacked in contact. Side-by-side
    /// touching is not a stacking contact and is not reported.
    pub fn check_invariants(&self) -> Result<(), SimError> {
        let cfg = &self.config;
        for ball in self.resting.iter().chain(self.active.iter()) {
            if !(ball.radius > 0.0) {
                return Err(SimError::invariant(format!(
                    "ball {} has radius {}",
                    ball.id, ball.radius
                )));
            }
            let (min_x, max_x) = cfg.x_range(ball.radius);
            if ball.pos.x < min_x - BOUNDS_EPSILON || ball.pos.x > max_x + BOUNDS_EPSILON {
                return Err(SimError::invariant(format!(
                    "ball {} at x={} outside [{min_x}, {max_x}]",
                    ball.id, ball.pos.x
                )));
            }
        }

        for (i, a) in self.resting.iter().enumerate() {
            for b in &self.resting[i + 1..] {
                if a.is_moving() || b.is_moving() {
                    continue;
                }
                if a.unmerged_contact(b, cfg.stack_alignment, cfg.merge_radius_tolerance) {
                    return Err(SimError::invariant(format!(
                        "balls {} and {} are merge-eligible and touching",
                        a.id, b.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_wraps() {
        assert_eq!(Tier::MIN.next(), Tier::new(1).unwrap());
        assert_eq!(Tier::MAX.next(), Tier::MIN);
        assert!(Tier::new(TIER_COUNT as u8).is_none());
        assert_eq!(Tier::MAX.spawn_radius(), 50.0);
    }

    #[test]
    fn test_tier_serde_rejects_out_of_range() {
        assert_eq!(serde_json::to_string(&Tier::MAX).unwrap(), "5");
        assert!(serde_json::from_str::<Tier>("6").is_err());
        assert_eq!(serde_json::from_str::<Tier>("2").unwrap(), Tier::new(2).unwrap());
    }

    #[test]
    fn test_merge_eligibility() {
        let a = Ball::new(1, Tier::MIN, Vec2::ZERO);
        let mut b = Ball::new(2, Tier::MIN, Vec2::ZERO);
        assert!(a.merge_eligible(&b, MERGE_RADIUS_TOLERANCE));

        b.radius = 18.0 * 1.06;
        assert!(!a.merge_eligible(&b, MERGE_RADIUS_TOLERANCE));

        let c = Ball::new(3, Tier::new(1).unwrap(), Vec2::ZERO);
        assert!(!a.merge_eligible(&c, MERGE_RADIUS_TOLERANCE));
    }

    #[test]
    fn test_motion_transitions() {
        let mut ball = Ball::new(1, Tier::MIN, Vec2::new(100.0, 100.0));
        ball.integrate(GRAVITY);
        assert!(ball.is_moving());
        assert!((ball.pos.y - 100.13).abs() < 1e-4);

        ball.roll(0.4);
        assert_eq!(ball.motion, MotionState::Rolling);
        assert!(ball.is_moving());

        ball.settle();
        assert!(ball.is_settled(REST_SPEED));
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_invariants_flag_stacked_pair() {
        let mut state = GameState::new(SimConfig::default(), 1);
        state.place(Tier::MIN, Vec2::new(200.0, 582.0), MotionState::Resting);
        state.place(Tier::MIN, Vec2::new(201.0, 546.0), MotionState::Resting);
        assert!(matches!(
            state.check_invariants(),
            Err(SimError::InvariantViolation { .. })
        ));

        // Side by side on the floor is not a stacking contact
        let mut state = GameState::new(SimConfig::default(), 1);
        state.place(Tier::MIN, Vec2::new(200.0, 582.0), MotionState::Resting);
        state.place(Tier::MIN, Vec2::new(236.0, 582.0), MotionState::Resting);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_invariants_flag_out_of_bounds() {
        let mut state = GameState::new(SimConfig::default(), 1);
        state.place(Tier::MIN, Vec2::new(5.0, 582.0), MotionState::Resting);
        assert!(state.check_invariants().is_err());

        // Even a tenth of a unit past the wall is out
        let mut state = GameState::new(SimConfig::default(), 1);
        state.place(Tier::MIN, Vec2::new(17.9, 582.0), MotionState::Resting);
        assert!(state.check_invariants().is_err());

        let mut state = GameState::new(SimConfig::default(), 1);
        state.place(Tier::MIN, Vec2::new(382.0, 582.0), MotionState::Resting);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_unmerged_contact_is_symmetric() {
        let mut a = Ball::new(1, Tier::MIN, Vec2::new(200.0, 582.0));
        let mut b = Ball::new(2, Tier::MIN, Vec2::new(200.0, 582.0));
        a.radius = 18.0;
        b.radius = 18.9;
        assert!(a.unmerged_contact(&b, STACK_ALIGNMENT, MERGE_RADIUS_TOLERANCE));
        assert!(b.unmerged_contact(&a, STACK_ALIGNMENT, MERGE_RADIUS_TOLERANCE));

        b.pos.y = 582.0 - 40.0;
        assert!(!a.unmerged_contact(&b, STACK_ALIGNMENT, MERGE_RADIUS_TOLERANCE));
    }
}
