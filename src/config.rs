//! Simulation tuning
//!
//! Every value defaults to the constants in [`crate::consts`]. The stacking
//! thresholds are tuned heuristics; change them only to retune game feel.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Play area ===
    pub width: f32,
    pub height: f32,

    // === Motion ===
    /// Gravity, units/tick²
    pub gravity: f32,
    /// Horizontal input displacement per tick
    pub input_speed: f32,

    // === Stacking contact ===
    /// Share of the radii sum the centres must be within horizontally
    pub stack_alignment: f32,
    /// Extra depth allowed beyond the fall speed
    pub stack_slack: f32,
    /// Offset under which a landing ball does not roll
    pub roll_dead_zone: f32,
    /// Rolling velocity per unit of offset
    pub roll_factor: f32,
    /// Settling speed threshold
    pub rest_speed: f32,

    // === Merging ===
    /// Relative radius tolerance for merge eligibility
    pub merge_radius_tolerance: f32,
    /// Radius multiplier for the merged ball
    pub merge_growth: f32,
    /// Downward velocity seeded into a merged ball
    pub merge_seed_velocity: f32,
    /// Let post-merge falling balls merge with what they land on
    pub chain_merges: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,

            gravity: GRAVITY,
            input_speed: INPUT_SPEED,

            stack_alignment: STACK_ALIGNMENT,
            stack_slack: STACK_SLACK,
            roll_dead_zone: ROLL_DEAD_ZONE,
            roll_factor: ROLL_FACTOR,
            rest_speed: REST_SPEED,

            merge_radius_tolerance: MERGE_RADIUS_TOLERANCE,
            merge_growth: MERGE_GROWTH,
            merge_seed_velocity: MERGE_SEED_VELOCITY,
            chain_merges: false,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let largest = TIER_RADII[TIER_COUNT - 1];
        if !(self.width > 2.0 * largest) || !(self.height > 2.0 * largest) {
            return Err(SimError::InvalidConfig(format!(
                "play area {}x{} cannot fit a tier {} ball",
                self.width,
                self.height,
                TIER_COUNT - 1
            )));
        }
        if !(self.gravity > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        if !(self.input_speed >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "input_speed must be non-negative, got {}",
                self.input_speed
            )));
        }
        if !(self.stack_alignment > 0.0 && self.stack_alignment <= 1.0) {
            return Err(SimError::InvalidConfig(format!(
                "stack_alignment must be in (0, 1], got {}",
                self.stack_alignment
            )));
        }
        if !(self.merge_radius_tolerance >= 0.0 && self.merge_radius_tolerance < 1.0) {
            return Err(SimError::InvalidConfig(format!(
                "merge_radius_tolerance must be in [0, 1), got {}",
                self.merge_radius_tolerance
            )));
        }
        if !(self.merge_growth >= 1.0) {
            return Err(SimError::InvalidConfig(format!(
                "merge_growth must be at least 1, got {}",
                self.merge_growth
            )));
        }
        if self.stack_slack < 0.0 || self.roll_dead_zone < 0.0 || self.rest_speed <= 0.0 {
            return Err(SimError::InvalidConfig(
                "stack_slack and roll_dead_zone must be non-negative, rest_speed positive".into(),
            ));
        }
        Ok(())
    }

    /// Horizontal range a ball's centre may occupy
    #[inline]
    pub fn x_range(&self, radius: f32) -> (f32, f32) {
        (radius, self.width - radius)
    }
}
