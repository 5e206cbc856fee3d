//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one tick. Gravity and every contact
//! threshold are tuned per tick, so callers must keep the cadence roughly
//! uniform (see `Game::update`).

use serde::{Deserialize, Serialize};

use super::collision::{
    Contact, find_contact, find_overlap, land_on, resolve_floor, resolve_walls, wedged,
};
use super::state::{Ball, GameEvent, GamePhase, GameState};
use crate::config::SimConfig;

/// Held horizontal steering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    None,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::None => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering applied to the active ball this tick
    pub horizontal: Direction,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Frozen once over
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;
    let cfg = state.config.clone();

    if state.ready_to_spawn() {
        state.spawn_active();
    }

    if let Some(ball) = state.active.take() {
        step_active(state, ball, input, &cfg);
    }

    step_movers(state, &cfg);

    check_game_over(state);
}

/// Gravity, steering, bounds and contacts for the player's ball
fn step_active(state: &mut GameState, mut ball: Ball, input: &TickInput, cfg: &SimConfig) {
    ball.integrate(cfg.gravity);
    ball.pos.x += input.horizontal.sign() * cfg.input_speed;

    resolve_walls(&mut ball, cfg);
    resolve_floor(&mut ball, cfg);

    match find_contact(&ball, &state.resting, None, true, cfg) {
        Contact::Merge { index } => {
            // Nothing spawns until the merged ball settles
            state.merge_into(ball, index);
            return;
        }
        Contact::Land { index, cradled } => {
            let below = state.resting[index];
            land_on(&mut ball, &below, cfg);
            if cradled || wedged(&ball, cfg) {
                ball.settle();
            }
        }
        Contact::Clear => ball.lose_support(),
    }

    if ball.is_settled(cfg.rest_speed) {
        // Fell past a same-tier ball and came to rest inside it
        if let Some(index) = find_overlap(&ball, &state.resting, None, cfg) {
            state.merge_into(ball, index);
            return;
        }
        log::debug!(
            "Ball {} settled at ({:.1}, {:.1})",
            ball.id,
            ball.pos.x,
            ball.pos.y
        );
        state.events.push(GameEvent::Landed { id: ball.id });
        state.resting.push(ball);
    } else {
        state.active = Some(ball);
    }
}

/// Physics for resting-set balls still falling or rolling after a merge.
///
/// Movers are tracked by id so a chain merge removing entries mid-pass
/// never invalidates the walk.
fn step_movers(state: &mut GameState, cfg: &SimConfig) {
    let movers: Vec<u32> = state
        .resting
        .iter()
        .filter(|b| b.is_moving())
        .map(|b| b.id)
        .collect();

    for id in movers {
        let Some(index) = state.resting_index(id) else {
            continue;
        };
        let mut ball = state.resting[index];

        ball.integrate(cfg.gravity);
        resolve_walls(&mut ball, cfg);
        resolve_floor(&mut ball, cfg);

        match find_contact(&ball, &state.resting, Some(index), cfg.chain_merges, cfg) {
            Contact::Merge { index: target } => {
                merge_mover(state, index, ball, target);
                continue;
            }
            Contact::Land { index: below, cradled } => {
                let below = state.resting[below];
                land_on(&mut ball, &below, cfg);
                if cradled || wedged(&ball, cfg) {
                    ball.settle();
                }
            }
            Contact::Clear => ball.lose_support(),
        }

        if cfg.chain_merges && !ball.is_moving() {
            if let Some(target) = find_overlap(&ball, &state.resting, Some(index), cfg) {
                merge_mover(state, index, ball, target);
                continue;
            }
        }

        state.resting[index] = ball;
    }
}

/// Pull the mover at `index` out of the resting set and merge it into `target`
fn merge_mover(state: &mut GameState, index: usize, ball: Ball, target: usize) {
    state.resting.remove(index);
    let target = if target > index { target - 1 } else { target };
    state.merge_into(ball, target);
}

/// Any resting ball poking above the ceiling ends the run
fn check_game_over(state: &mut GameState) {
    if let Some(ball) = state.resting.iter().find(|b| b.top() < 0.0) {
        log::info!(
            "Game over: ball {} reached the top, final score {}",
            ball.id,
            state.score
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}
