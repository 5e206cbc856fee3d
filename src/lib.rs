//! Ball Drop - a falling-ball merge game
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (spawning, collisions, merges, game state)
//! - `game`: Controller owning the simulation state and buffered input
//! - `config`: Tunable simulation constants
//! - `autoplay`: Simple steering policy for headless runs

pub mod autoplay;
pub mod config;
pub mod error;
pub mod game;
pub mod sim;

pub use config::SimConfig;
pub use error::SimError;
pub use game::Game;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick (50 Hz; gravity and thresholds are tuned per tick)
    pub const TICK_SECS: f32 = 0.020;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (origin top-left, y grows downward)
    pub const PLAY_WIDTH: f32 = 400.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Downward acceleration, units/tick²
    pub const GRAVITY: f32 = 0.13;
    /// Horizontal displacement per tick while input is held
    pub const INPUT_SPEED: f32 = 5.0;

    /// Number of tiers; merging the top tier wraps to tier 0
    pub const TIER_COUNT: usize = 6;
    /// Spawn radius per tier
    pub const TIER_RADII: [f32; TIER_COUNT] = [18.0, 22.0, 26.0, 32.0, 40.0, 50.0];
    /// Display colour per tier
    pub const TIER_COLORS: [&str; TIER_COUNT] =
        ["#b3e5fc", "#4fc3f7", "#0288d1", "#ffd54f", "#ff7043", "#8e24aa"];
    /// Upper bounds of the cumulative probability bands for tiers 0..=4 (tier 5 takes the rest)
    pub const TIER_BANDS: [f64; TIER_COUNT - 1] = [0.50, 0.75, 0.87, 0.94, 0.98];

    /// Stacking test: horizontal centre distance must be under this share of the radii sum
    pub const STACK_ALIGNMENT: f32 = 0.9;
    /// Stacking test: crossing depth must be under fall speed plus this slack
    pub const STACK_SLACK: f32 = 1.0;
    /// Horizontal offset below which a landing ball stays put
    pub const ROLL_DEAD_ZONE: f32 = 2.0;
    /// Horizontal velocity per unit of offset when rolling off a ball
    pub const ROLL_FACTOR: f32 = 0.08;
    /// Vertical speed under which a landed ball counts as settled
    pub const REST_SPEED: f32 = 0.1;

    /// Radii within this fraction of each other are merge-compatible
    pub const MERGE_RADIUS_TOLERANCE: f32 = 0.05;
    /// Radius growth per merge
    pub const MERGE_GROWTH: f32 = 1.25;
    /// Downward velocity given to a freshly merged ball
    pub const MERGE_SEED_VELOCITY: f32 = 0.5;
}
