//! Hand-tuned board evaluation without learned weights.
//!
//! Every legal afterstate is scored by the sum of:
//!
//! - the merge reward of the slide,
//! - an adjacency bonus for each neighbouring pair of cells whose exponents
//!   differ by one (or that are both 2-tiles), counted over the four rotations
//!   of the afterstate,
//! - an empty-cell bonus accumulated over the four follow-up slides: after
//!   each legal follow-up the running empty count grows by that follow-up's
//!   empty cells and the bonus is paid on the running total,
//! - the largest exponent times a multiplier when the largest tile sits in a
//!   corner,
//! - a Fibonacci bonus when the largest tile stays where it was and is above a
//!   threshold exponent.

use tdl2048_engine::{Board, Cell, Direction};

use crate::move_selector::{MoveSelector, afterstates};

const CORNERS: [usize; 4] = [0, Board::SIZE - 1, Board::CELLS - Board::SIZE, Board::CELLS - 1];

/// Bonus weights of [`HeuristicSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicWeights {
    pub adjacency_bonus: u64,
    pub empty_bonus: u64,
    pub corner_multiplier: u64,
    /// The Fibonacci bonus applies to exponents strictly above this one.
    pub fib_threshold: Cell,
}

/// Named weight sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display, derive_more::FromStr)]
pub enum HeuristicPreset {
    /// Balanced adjacency and empty-cell bonuses.
    #[default]
    #[display("classic")]
    Classic,
    /// Weighs free space more heavily.
    #[display("spacious")]
    Spacious,
}

impl HeuristicPreset {
    #[must_use]
    pub fn weights(self) -> HeuristicWeights {
        match self {
            HeuristicPreset::Classic => HeuristicWeights {
                adjacency_bonus: 3,
                empty_bonus: 2,
                corner_multiplier: 1,
                fib_threshold: 6,
            },
            HeuristicPreset::Spacious => HeuristicWeights {
                adjacency_bonus: 3,
                empty_bonus: 5,
                corner_multiplier: 1,
                fib_threshold: 6,
            },
        }
    }
}

/// Picks the afterstate with the highest heuristic score.
///
/// Ties go to the direction found last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicSelector {
    weights: HeuristicWeights,
}

impl HeuristicSelector {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn from_preset(preset: HeuristicPreset) -> Self {
        Self::new(preset.weights())
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Scores of the four slides in direction order, `None` for illegal ones.
    #[must_use]
    pub fn score_moves(&self, board: &Board) -> [Option<u64>; Direction::LEN] {
        let anchor = board.max_tile_index();
        let mut scores = [None; Direction::LEN];
        for after in afterstates(board) {
            let mut score = u64::from(after.reward);
            score += self.adjacency_score(&after.board);
            score += self.space_score(&after.board);

            let top = after.board.max_tile_index();
            let top_exponent = after.board.cell(top);
            if CORNERS.contains(&top) {
                score += u64::from(top_exponent) * self.weights.corner_multiplier;
            }
            if top == anchor && top_exponent > self.weights.fib_threshold {
                score += fib(top_exponent - 2);
            }
            scores[usize::from(after.direction.code())] = Some(score);
        }
        scores
    }

    fn adjacency_score(&self, board: &Board) -> u64 {
        let mut pairs = 0;
        for turns in 0..Direction::LEN {
            let mut rotated = *board;
            rotated.rotate(turns);
            for row in rotated.exponents().chunks_exact(Board::SIZE) {
                pairs += row
                    .windows(2)
                    .filter(|w| w[0].abs_diff(w[1]) == 1 || (w[0] == 1 && w[1] == 1))
                    .count() as u64;
            }
        }
        pairs * self.weights.adjacency_bonus
    }

    fn space_score(&self, board: &Board) -> u64 {
        let mut empty = 0;
        let mut score = 0;
        for direction in Direction::ALL {
            let Some((_, next)) = board.clone_and_slide(direction) else {
                continue;
            };
            empty += next.empty_count() as u64;
            score += empty * self.weights.empty_bonus;
        }
        score
    }
}

impl Default for HeuristicSelector {
    fn default() -> Self {
        Self::from_preset(HeuristicPreset::default())
    }
}

impl MoveSelector for HeuristicSelector {
    fn select_move(&self, board: &Board) -> Option<Direction> {
        let scores = self.score_moves(board);
        Direction::ALL
            .into_iter()
            .zip(scores)
            .filter_map(|(direction, score)| Some((direction, score?)))
            .max_by_key(|(_, score)| *score)
            .map(|(direction, _)| direction)
    }
}

/// Fibonacci number with `fib(0) = 0` and `fib(1) = 1`.
fn fib(n: Cell) -> u64 {
    let (mut a, mut b) = (0_u64, 1_u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_board() -> Board {
        Board::from_exponents([1, 7, 0, 0, 2, 2, 2, 0, 0, 3, 2, 4, 3, 0, 0, 0])
    }

    fn second_board() -> Board {
        Board::from_exponents([2, 2, 3, 4, 0, 0, 8, 1, 3, 0, 0, 0, 0, 1, 1, 0])
    }

    #[test]
    fn test_fib() {
        let values: Vec<_> = (0..10).map(fib).collect();
        assert_eq!(values, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(
            "classic".parse::<HeuristicPreset>().unwrap(),
            HeuristicPreset::Classic
        );
        assert_eq!(
            "Spacious".parse::<HeuristicPreset>().unwrap(),
            HeuristicPreset::Spacious
        );
        assert!("greedy".parse::<HeuristicPreset>().is_err());
        assert_eq!(HeuristicPreset::Spacious.to_string(), "spacious");
    }

    #[test]
    fn test_classic_scores() {
        let selector = HeuristicSelector::from_preset(HeuristicPreset::Classic);
        assert_eq!(
            selector.score_moves(&first_board()),
            [Some(149), Some(157), Some(146), Some(137)]
        );
        assert_eq!(selector.select_move(&first_board()), Some(Direction::Right));
        assert_eq!(selector.select_move(&second_board()), Some(Direction::Up));
    }

    #[test]
    fn test_spacious_scores() {
        let selector = HeuristicSelector::from_preset(HeuristicPreset::Spacious);
        assert_eq!(
            selector.score_moves(&first_board()),
            [Some(317), Some(316), Some(308), Some(305)]
        );
        assert_eq!(selector.select_move(&first_board()), Some(Direction::Up));
        assert_eq!(selector.select_move(&second_board()), Some(Direction::Left));
    }

    #[test]
    fn test_ties_go_to_later_direction() {
        let corner = Board::from_exponents([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let classic = HeuristicSelector::from_preset(HeuristicPreset::Classic);
        assert_eq!(
            classic.score_moves(&corner),
            [None, Some(103), Some(103), None]
        );
        assert_eq!(classic.select_move(&corner), Some(Direction::Down));

        let spacious = HeuristicSelector::from_preset(HeuristicPreset::Spacious);
        assert_eq!(
            spacious.score_moves(&corner),
            [None, Some(238), Some(238), None]
        );
        assert_eq!(spacious.select_move(&corner), Some(Direction::Down));

        let inner = Board::from_exponents([0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(classic.score_moves(&inner), [Some(198); Direction::LEN]);
        assert_eq!(classic.select_move(&inner), Some(Direction::Left));
    }

    #[test]
    fn test_illegal_moves_are_not_scored() {
        let board = Board::from_exponents([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let scores = HeuristicSelector::default().score_moves(&board);
        assert_eq!(scores[0], None);
        assert_eq!(scores[3], None);
        assert!(scores[1].is_some() && scores[2].is_some());
    }

    #[test]
    fn test_no_legal_move() {
        let stuck = Board::from_exponents([1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1]);
        assert_eq!(
            HeuristicSelector::default().score_moves(&stuck),
            [None; Direction::LEN]
        );
        assert_eq!(HeuristicSelector::default().select_move(&stuck), None);
    }
}
