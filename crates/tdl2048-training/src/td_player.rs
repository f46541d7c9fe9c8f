use std::mem;

use tdl2048_engine::{Action, Agent, Board, Cell, Reward, Role, reached_tile};
use tdl2048_evaluator::{move_selector::best_afterstate, network::NTupleNetwork};

/// One recorded move of the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub reward: Reward,
    pub afterstate: Board,
}

/// Player that learns its value network by TD(0) on afterstates.
///
/// Moves are chosen greedily on `reward + estimate(afterstate)`, keeping the
/// earliest direction on ties. Learning happens only in
/// [`Agent::close_episode`]; with `alpha == 0` the network never changes.
#[derive(Debug, Clone)]
pub struct TdPlayer {
    name: String,
    network: NTupleNetwork,
    alpha: f32,
    history: Vec<Step>,
    win_tile: Option<Cell>,
}

impl TdPlayer {
    #[must_use]
    pub fn new(name: impl Into<String>, network: NTupleNetwork, alpha: f32) -> Self {
        Self {
            name: name.into(),
            network,
            alpha,
            history: Vec::new(),
            win_tile: None,
        }
    }

    /// Declares a win once a tile with this exponent appears.
    #[must_use]
    pub fn with_win_tile(mut self, win_tile: Option<Cell>) -> Self {
        self.win_tile = win_tile;
        self
    }

    #[must_use]
    pub fn network(&self) -> &NTupleNetwork {
        &self.network
    }

    #[must_use]
    pub fn into_network(self) -> NTupleNetwork {
        self.network
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Moves recorded since the episode opened.
    #[must_use]
    pub fn history(&self) -> &[Step] {
        &self.history
    }

    fn learn_from_history(&mut self) {
        let history = mem::take(&mut self.history);
        let mut target = 0.0;
        for step in history.iter().rev() {
            self.network.adjust(&step.afterstate, target, self.alpha);
            #[expect(clippy::cast_precision_loss)]
            let reward = step.reward as f32;
            target = reward + self.network.estimate(&step.afterstate);
        }
        log::trace!("{}: updated {} afterstates", self.name, history.len());
    }
}

impl Agent for TdPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Player
    }

    fn open_episode(&mut self) {
        self.history.clear();
    }

    fn close_episode(&mut self) {
        if self.alpha == 0.0 || self.history.is_empty() {
            self.history.clear();
            return;
        }
        self.learn_from_history();
    }

    fn take_action(&mut self, board: &Board) -> Option<Action> {
        let after = best_afterstate(board, &self.network)?;
        self.history.push(Step {
            reward: after.reward,
            afterstate: after.board,
        });
        Some(Action::Slide(after.direction))
    }

    fn check_for_win(&self, board: &Board) -> bool {
        reached_tile(board, self.win_tile)
    }
}
