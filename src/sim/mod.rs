//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (everything is tuned per tick)
//! - One owner: `GameState` is mutated only through `tick`
//! - Resting-set entries are tracked by stable entity ID
//! - No rendering or platform dependencies

pub mod collision;
pub mod merge;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, find_contact, land_on, stacking_contact};
pub use merge::{merge_points, merged_ball};
pub use spawn::{roll_tier, spawn_ball, tier_for_roll};
pub use state::{Ball, GameEvent, GamePhase, GameState, MotionState, Snapshot, Tier};
pub use tick::{Direction, TickInput, tick};
