use crate::core::{
    board::{Board, Cell, Reward},
    direction::Direction,
};

/// A move exchanged between an agent and the episode driver.
///
/// Players answer with [`Action::Slide`], environments with [`Action::Place`].
/// An agent with nothing to do returns `None` instead of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Action {
    #[display("slide {_0}")]
    Slide(Direction),
    #[display("place {tile}@{cell}")]
    Place { cell: usize, tile: Cell },
}

impl Action {
    /// Applies the action to `board`.
    ///
    /// Returns the reward of a slide (`0` for a placement), or `None` if the
    /// action is not legal on this board. An illegal action leaves the board
    /// untouched.
    pub fn apply(self, board: &mut Board) -> Option<Reward> {
        match self {
            Action::Slide(direction) => board.slide(direction),
            Action::Place { cell, tile } => board.place(cell, tile).ok().map(|()| 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_place_then_slide() {
        let mut board = Board::EMPTY;
        assert_eq!(Action::Place { cell: 3, tile: 1 }.apply(&mut board), Some(0));
        assert_eq!(Action::Place { cell: 3, tile: 1 }.apply(&mut board), None);
        assert_eq!(Action::Slide(Direction::Left).apply(&mut board), Some(0));
        assert_eq!(board.cell(0), 1);
        assert_eq!(Action::Slide(Direction::Left).apply(&mut board), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Slide(Direction::Up).to_string(), "slide up");
        assert_eq!(Action::Place { cell: 7, tile: 2 }.to_string(), "place 2@7");
    }
}
