//! Game controller
//!
//! Owns the simulation state and the buffered steering input. Renderers and
//! input handlers talk to the simulation only through this type.

use crate::config::SimConfig;
use crate::consts::{MAX_SUBSTEPS, TICK_SECS};
use crate::error::SimError;
use crate::sim::{Direction, GameState, Snapshot, TickInput, tick};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    config: SimConfig,
    state: Option<GameState>,
    input: TickInput,
    /// Fixed seed for every new game; entropy when `None`
    seed: Option<u64>,
    accumulator: f32,
}

impl Game {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            state: None,
            input: TickInput::default(),
            seed: None,
            accumulator: 0.0,
        }
    }

    /// Every new game draws spawns from the same seed
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(config)
        }
    }

    /// Reset score and board, clear game over, and spawn the first ball
    pub fn new_game(&mut self) {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut state = GameState::new(self.config.clone(), seed);
        state.spawn_active();
        log::info!("New game started with seed: {}", seed);

        self.state = Some(state);
        self.input = TickInput::default();
        self.accumulator = 0.0;
    }

    /// Advance one tick and report the result.
    ///
    /// After game over this keeps returning the frozen board.
    pub fn tick(&mut self) -> Result<Snapshot, SimError> {
        let state = self.state.as_mut().ok_or(SimError::NoActiveGame)?;
        tick(state, &self.input);
        Ok(state.snapshot())
    }

    /// Hold a steering direction; it applies on every tick until replaced
    pub fn apply_horizontal_input(&mut self, direction: Direction) -> Result<(), SimError> {
        if self.state.is_none() {
            return Err(SimError::NoActiveGame);
        }
        self.input.horizontal = direction;
        Ok(())
    }

    /// Run as many whole ticks as `elapsed` seconds cover (capped).
    ///
    /// Leftover time carries into the next call. Returns the ticks run.
    pub fn update(&mut self, elapsed: f32) -> Result<u32, SimError> {
        let state = self.state.as_mut().ok_or(SimError::NoActiveGame)?;
        self.accumulator += elapsed.clamp(0.0, 0.25);

        let mut substeps = 0;
        while self.accumulator >= TICK_SECS && substeps < MAX_SUBSTEPS {
            tick(state, &self.input);
            self.accumulator -= TICK_SECS;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Falling behind; drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(TICK_SECS);
        }
        Ok(substeps)
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state.as_ref().map(GameState::snapshot)
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.state.as_ref().is_some_and(GameState::is_game_over)
    }
}
