//! Idle/demo steering
//!
//! Picks a direction for the active ball by looking for an exposed resting
//! ball it could merge with.

use crate::config::SimConfig;
use crate::sim::{Ball, Direction, Snapshot};

/// Resting balls nothing is stacked on
fn exposed(resting: &[Ball], cfg: &SimConfig) -> Vec<Ball> {
    resting
        .iter()
        .filter(|b| {
            !resting.iter().any(|other| {
                other.id != b.id
                    && other.pos.y < b.pos.y
                    && (other.pos.x - b.pos.x).abs()
                        < (other.radius + b.radius) * cfg.stack_alignment
            })
        })
        .copied()
        .collect()
}

/// Steer toward the nearest exposed merge partner; hold still otherwise
pub fn suggest(snapshot: &Snapshot, cfg: &SimConfig) -> Direction {
    let Some(active) = snapshot.active else {
        return Direction::None;
    };

    let target = exposed(&snapshot.resting, cfg)
        .into_iter()
        .filter(|b| !b.is_moving() && active.merge_eligible(b, cfg.merge_radius_tolerance))
        .min_by(|a, b| {
            let da = (a.pos.x - active.pos.x).abs();
            let db = (b.pos.x - active.pos.x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    match target {
        Some(t) if t.pos.x > active.pos.x + cfg.input_speed => Direction::Right,
        Some(t) if t.pos.x < active.pos.x - cfg.input_speed => Direction::Left,
        _ => Direction::None,
    }
}
