//! Move selection: choosing a slide direction for the current board.
//!
//! Every policy implements [`MoveSelector`]. Selectors are stateless and only
//! look at copies of the board, so a selector can be shared between episodes.
//!
//! The value-based choice is exposed as a free function, [`best_afterstate`],
//! because the TD learner needs the chosen afterstate (not only the direction)
//! to record its episode history.

use std::fmt;

use tdl2048_engine::{Board, Direction, Reward};

use crate::network::NTupleNetwork;

/// Chooses a slide direction for a board.
pub trait MoveSelector: fmt::Debug {
    /// Returns the chosen direction, or `None` when no slide is legal.
    fn select_move(&self, board: &Board) -> Option<Direction>;
}

/// Result of a legal slide from a given board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Afterstate {
    pub direction: Direction,
    pub reward: Reward,
    pub board: Board,
}

/// Legal afterstates of `board`, in direction order.
pub fn afterstates(board: &Board) -> impl Iterator<Item = Afterstate> + '_ {
    Direction::ALL.into_iter().filter_map(|direction| {
        let (reward, board) = board.clone_and_slide(direction)?;
        Some(Afterstate {
            direction,
            reward,
            board,
        })
    })
}

/// Returns the afterstate maximising `reward + estimate(afterstate)`.
///
/// Ties keep the earliest direction: a later candidate must be strictly
/// better to replace the current best.
#[must_use]
pub fn best_afterstate(board: &Board, network: &NTupleNetwork) -> Option<Afterstate> {
    let mut best: Option<(f32, Afterstate)> = None;
    for after in afterstates(board) {
        #[expect(clippy::cast_precision_loss)]
        let value = after.reward as f32 + network.estimate(&after.board);
        if best.is_none_or(|(best_value, _)| value > best_value) {
            best = Some((value, after));
        }
    }
    best.map(|(_, after)| after)
}

/// Greedy one-ply selection on a value network without learning.
#[derive(Debug)]
pub struct ValueSelector<'a> {
    network: &'a NTupleNetwork,
}

impl<'a> ValueSelector<'a> {
    #[must_use]
    pub fn new(network: &'a NTupleNetwork) -> Self {
        Self { network }
    }
}

impl MoveSelector for ValueSelector<'_> {
    fn select_move(&self, board: &Board) -> Option<Direction> {
        best_afterstate(board, self.network).map(|after| after.direction)
    }
}
