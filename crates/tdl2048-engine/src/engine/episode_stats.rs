use crate::core::{Action, Board, Cell, Reward};

/// Statistics of a single episode.
///
/// - **Score**: Sum of slide rewards
/// - **Slides / placements**: Number of player and environment actions
/// - **Max exponent**: Exponent of the largest tile seen on the board
///
/// # Example
///
/// ```
/// use tdl2048_engine::{Action, Board, Direction, EpisodeStats};
///
/// let mut board = Board::from_exponents([0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
/// let mut stats = EpisodeStats::new();
/// let action = Action::Slide(Direction::Left);
/// let reward = action.apply(&mut board).unwrap();
/// stats.record(action, reward, &board);
///
/// assert_eq!(stats.score(), 4);
/// assert_eq!(stats.slides(), 1);
/// assert_eq!(stats.max_tile(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EpisodeStats {
    score: u64,
    slides: usize,
    placements: usize,
    max_exponent: Cell,
}

impl EpisodeStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            slides: 0,
            placements: 0,
            max_exponent: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn slides(&self) -> usize {
        self.slides
    }

    #[must_use]
    pub const fn placements(&self) -> usize {
        self.placements
    }

    /// Total number of applied actions of both agents.
    #[must_use]
    pub const fn actions(&self) -> usize {
        self.slides + self.placements
    }

    #[must_use]
    pub const fn max_exponent(&self) -> Cell {
        self.max_exponent
    }

    /// Value of the largest tile (`0` before the first placement).
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        if self.max_exponent == 0 {
            0
        } else {
            1 << self.max_exponent
        }
    }

    /// Updates the statistics after `action` was applied and produced `reward`.
    pub fn record(&mut self, action: Action, reward: Reward, board: &Board) {
        match action {
            Action::Slide(_) => self.slides += 1,
            Action::Place { .. } => self.placements += 1,
        }
        self.score += u64::from(reward);
        self.max_exponent = self.max_exponent.max(board.max_exponent());
    }
}
