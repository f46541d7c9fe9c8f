use std::{fmt, str::FromStr};

use crate::core::{Action, Board, Cell};

/// Side an agent plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Role {
    #[display("play")]
    Player,
    #[display("environment")]
    Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown role: {_0:?}")]
pub struct ParseRoleError(#[error(not(source))] pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" | "player" => Ok(Self::Player),
            "environment" | "env" | "evil" => Ok(Self::Environment),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}

/// A participant of an episode.
///
/// The driver calls [`Agent::open_episode`] once, then alternates
/// [`Agent::take_action`] between the two agents, and finally calls
/// [`Agent::close_episode`]. Returning `None` from `take_action` ends the episode.
pub trait Agent: fmt::Debug {
    fn name(&self) -> &str;

    fn role(&self) -> Role;

    fn open_episode(&mut self) {}

    fn close_episode(&mut self) {}

    /// Chooses the next action for `board`, or `None` if there is nothing to do.
    fn take_action(&mut self, board: &Board) -> Option<Action>;

    /// Returns `true` if this agent has won on `board` after its own action.
    fn check_for_win(&self, _board: &Board) -> bool {
        false
    }
}

/// Win condition shared by players configured with a target tile.
#[must_use]
pub fn reached_tile(board: &Board, target: Option<Cell>) -> bool {
    target.is_some_and(|exponent| board.max_exponent() >= exponent)
}
