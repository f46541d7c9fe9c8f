//! Exhaustive two-move lookahead on rewards.

use tdl2048_engine::{Board, Direction};

use crate::move_selector::{MoveSelector, afterstates};

/// Picks the first move of the two-slide sequence with the largest total reward.
///
/// Tile spawns between the two slides are ignored. Ties go to the pair found
/// last in direction order (`>=`).
///
/// A legal slide always leaves an empty cell next to some tile, so every
/// legal first move has at least one legal follow-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPlySelector;

impl MoveSelector for TwoPlySelector {
    fn select_move(&self, board: &Board) -> Option<Direction> {
        let mut best = None;
        for first in afterstates(board) {
            for second in afterstates(&first.board) {
                let total = first.reward + second.reward;
                if best.is_none_or(|(_, best_total)| total >= best_total) {
                    best = Some((first.direction, total));
                }
            }
        }
        best.map(|(direction, _)| direction)
    }
}
