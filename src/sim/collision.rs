//! Collision detection and response
//!
//! Contacts are resolved in priority order: side walls, floor, then balls
//! directly below. Ball-on-ball contact is a vertical stacking test rather
//! than full circle overlap, so glancing side hits are ignored.

use super::state::{Ball, MotionState};
use crate::config::SimConfig;

const WALL_EPSILON: f32 = 1e-3;

/// Outcome of checking a moving ball against the resting set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Nothing below within reach
    Clear,
    /// Rest on top of the resting-set member at `index`. `cradled` is set
    /// when other supports sit on both sides, so rolling would only bounce
    /// between them.
    Land { index: usize, cradled: bool },
    /// Merge with the resting-set member at `index`
    Merge { index: usize },
}

/// Clamp to the side walls, killing horizontal velocity on contact
pub fn resolve_walls(ball: &mut Ball, cfg: &SimConfig) -> bool {
    let (min_x, max_x) = cfg.x_range(ball.radius);
    if ball.pos.x < min_x {
        ball.pos.x = min_x;
        ball.vel.x = 0.0;
        true
    } else if ball.pos.x > max_x {
        ball.pos.x = max_x;
        ball.vel.x = 0.0;
        true
    } else {
        false
    }
}

/// Clamp to the floor (no bounce); the ball comes to rest on contact
pub fn resolve_floor(ball: &mut Ball, cfg: &SimConfig) -> bool {
    if ball.bottom() > cfg.height {
        ball.pos.y = cfg.height - ball.radius;
        ball.settle();
        true
    } else {
        false
    }
}

/// Whether `mover` has just come down onto `below`.
///
/// Requires the centres to be mostly aligned, the mover's bottom edge to have
/// crossed `below`'s top edge while its centre is still higher, and the
/// crossing to be shallower than one tick of fall plus slack.
pub fn stacking_contact(mover: &Ball, below: &Ball, cfg: &SimConfig) -> bool {
    let dx = mover.pos.x - below.pos.x;
    let aligned = dx.abs() < (mover.radius + below.radius) * cfg.stack_alignment;
    let depth = mover.bottom() - below.top();
    let crossing = depth > 0.0 && mover.pos.y < below.pos.y;
    aligned && crossing && depth.abs() < mover.vel.y.abs() + cfg.stack_slack
}

/// Find what `mover` hits in `others`, skipping `skip` (the mover itself).
///
/// A merge-eligible contact wins over a plain landing; otherwise the earliest
/// member in insertion order wins.
pub fn find_contact(
    mover: &Ball,
    others: &[Ball],
    skip: Option<usize>,
    allow_merge: bool,
    cfg: &SimConfig,
) -> Contact {
    let mut landing = None;
    let (mut left, mut right) = (false, false);
    for (index, other) in others.iter().enumerate() {
        if Some(index) == skip || !stacking_contact(mover, other, cfg) {
            continue;
        }
        if allow_merge && mover.merge_eligible(other, cfg.merge_radius_tolerance) {
            return Contact::Merge { index };
        }
        left |= other.pos.x < mover.pos.x;
        right |= other.pos.x > mover.pos.x;
        landing.get_or_insert(index);
    }
    match landing {
        Some(index) => Contact::Land {
            index,
            cradled: left && right,
        },
        None => Contact::Clear,
    }
}

/// First settled same-tier ball that `ball` sits on or inside without having
/// merged with it (e.g. after falling past it in one tick)
pub fn find_overlap(
    ball: &Ball,
    others: &[Ball],
    skip: Option<usize>,
    cfg: &SimConfig,
) -> Option<usize> {
    others.iter().enumerate().position(|(index, other)| {
        Some(index) != skip
            && !other.is_moving()
            && ball.unmerged_contact(other, cfg.stack_alignment, cfg.merge_radius_tolerance)
    })
}

/// Sit `mover` on top of `below`; roll off if outside the dead zone.
///
/// A ball whose drift points against the new roll has come back from a
/// neighbouring support and settles instead.
pub fn land_on(mover: &mut Ball, below: &Ball, cfg: &SimConfig) {
    mover.pos.y = below.pos.y - below.radius - mover.radius;
    let offset = mover.pos.x - below.pos.x;
    if offset.abs() > cfg.roll_dead_zone && mover.vel.x * offset >= 0.0 {
        mover.roll(offset * cfg.roll_factor);
    } else {
        mover.settle();
    }
}

/// A rolling ball pinned against the wall it is rolling toward
pub fn wedged(ball: &Ball, cfg: &SimConfig) -> bool {
    let (min_x, max_x) = cfg.x_range(ball.radius);
    ball.motion == MotionState::Rolling
        && ((ball.vel.x < 0.0 && ball.pos.x <= min_x + WALL_EPSILON)
            || (ball.vel.x > 0.0 && ball.pos.x >= max_x - WALL_EPSILON))
}
