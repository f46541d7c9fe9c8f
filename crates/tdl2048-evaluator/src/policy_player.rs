use tdl2048_engine::{Action, Agent, Board, Cell, Role, reached_tile};

use crate::move_selector::MoveSelector;

/// Player that delegates every move to a [`MoveSelector`].
#[derive(Debug)]
pub struct PolicyPlayer {
    name: String,
    selector: Box<dyn MoveSelector>,
    win_tile: Option<Cell>,
}

impl PolicyPlayer {
    #[must_use]
    pub fn new(name: impl Into<String>, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            name: name.into(),
            selector,
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

impl Agent for PolicyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Player
    }

    fn take_action(&mut self, board: &Board) -> Option<Action> {
        self.selector.select_move(board).map(Action::Slide)
    }

    fn check_for_win(&self, board: &Board) -> bool {
        reached_tile(board, self.win_tile)
    }
}
