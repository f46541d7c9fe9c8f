use arrayvec::ArrayVec;
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::{
    core::{Action, Board, Cell, Direction},
    engine::agent::{Agent, Role, reached_tile},
};

/// Probability that a spawned tile is a 4 instead of a 2.
const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// Creates the random engine owned by a random agent.
///
/// With a seed the engine is deterministic; without one it is seeded from the
/// thread-local generator.
#[must_use]
pub fn agent_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::seed_from_u64(rand::rng().random()),
    }
}

/// Environment that adds a random tile to a random empty cell.
///
/// - 2-tile: 90%
/// - 4-tile: 10%
///
/// Returns no action once the board is full.
#[derive(Debug, Clone)]
pub struct RandomEnvironment {
    name: String,
    rng: Pcg32,
}

impl RandomEnvironment {
    #[must_use]
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            name: name.into(),
            rng: agent_rng(seed),
        }
    }
}

impl Agent for RandomEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Environment
    }

    fn take_action(&mut self, board: &Board) -> Option<Action> {
        let empty: ArrayVec<usize, { Board::CELLS }> = board.empty_cells().collect();
        if empty.is_empty() {
            return None;
        }
        let cell = empty[self.rng.random_range(0..empty.len())];
        let tile: Cell = if self.rng.random_bool(FOUR_TILE_PROBABILITY) {
            2
        } else {
            1
        };
        Some(Action::Place { cell, tile })
    }
}

/// Player that slides in a random legal direction.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: Pcg32,
    win_tile: Option<Cell>,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            name: name.into(),
            rng: agent_rng(seed),
            win_tile: None,
        }
    }

    /// Declares a win once a tile with this exponent appears.
    #[must_use]
    pub fn with_win_tile(mut self, win_tile: Option<Cell>) -> Self {
        self.win_tile = win_tile;
        self
    }
}

impl Agent for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Player
    }

    fn take_action(&mut self, board: &Board) -> Option<Action> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
            .into_iter()
            .find(|d| board.clone_and_slide(*d).is_some())
            .map(Action::Slide)
    }

    fn check_for_win(&self, board: &Board) -> bool {
        reached_tile(board, self.win_tile)
    }
}
