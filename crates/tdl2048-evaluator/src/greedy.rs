//! Greedy selection on immediate reward.

use tdl2048_engine::{Board, Direction};

use crate::move_selector::{MoveSelector, afterstates};

/// Picks the legal slide with the largest immediate reward.
///
/// Ties go to the later direction: a candidate replaces the current best when
/// its reward is greater than *or equal to* it. The value-based selectors keep
/// the earlier direction instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &Board) -> Option<Direction> {
        let mut best = None;
        for after in afterstates(board) {
            if best.is_none_or(|(_, reward)| after.reward >= reward) {
                best = Some((after.direction, after.reward));
            }
        }
        best.map(|(direction, _)| direction)
    }
}
