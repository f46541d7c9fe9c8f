use crate::{
    core::Board,
    engine::{
        agent::{Agent, Role},
        episode_stats::EpisodeStats,
    },
};

/// Number of environment turns that open every episode.
const INITIAL_TILES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EpisodeState {
    Running,
    Finished,
}

/// One game between a player and an environment.
///
/// The environment owns the first two turns (the initial tiles); afterwards
/// the agents alternate, starting with the player. The episode ends when the
/// agent to move returns no action, returns an action that cannot be applied,
/// or declares a win through [`Agent::check_for_win`].
///
/// The environment only runs out of actions on a full board, and a legal
/// slide always leaves an empty cell, so in practice an episode ends on the
/// player's turn once no slide is legal.
#[derive(Debug, Clone)]
pub struct Episode {
    board: Board,
    stats: EpisodeStats,
    state: EpisodeState,
    last_mover: Option<Role>,
    winner: Option<Role>,
}

impl Default for Episode {
    fn default() -> Self {
        Self::new()
    }
}

impl Episode {
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::EMPTY)
    }

    /// Starts an episode from an arbitrary position.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            stats: EpisodeStats::new(),
            state: EpisodeState::Running,
            last_mover: None,
            winner: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// Role of the agent that made the last applied action.
    #[must_use]
    pub fn last_mover(&self) -> Option<Role> {
        self.last_mover
    }

    /// Winner of a finished episode.
    ///
    /// An agent that declared a win wins; otherwise the agent that moved last
    /// wins because its opponent could not answer.
    #[must_use]
    pub fn winner(&self) -> Option<Role> {
        self.winner.or(self.last_mover)
    }

    /// Role of the agent whose turn it is.
    #[must_use]
    pub fn next_turn(&self) -> Role {
        if self.stats.actions() < INITIAL_TILES {
            return Role::Environment;
        }
        match self.last_mover {
            Some(Role::Environment) => Role::Player,
            _ => Role::Environment,
        }
    }

    /// Plays the episode to its end, bracketing it with the agents'
    /// `open_episode` and `close_episode` hooks.
    pub fn run(&mut self, player: &mut dyn Agent, environment: &mut dyn Agent) {
        player.open_episode();
        environment.open_episode();
        while self.state.is_running() {
            self.step(player, environment);
        }
        player.close_episode();
        environment.close_episode();
    }

    /// Plays a single turn.
    pub fn step(&mut self, player: &mut dyn Agent, environment: &mut dyn Agent) -> EpisodeState {
        if self.state.is_finished() {
            return self.state;
        }
        let role = self.next_turn();
        let action = match role {
            Role::Player => player.take_action(&self.board),
            Role::Environment => environment.take_action(&self.board),
        };
        let Some(action) = action else {
            self.state = EpisodeState::Finished;
            return self.state;
        };
        let Some(reward) = action.apply(&mut self.board) else {
            self.state = EpisodeState::Finished;
            return self.state;
        };
        self.stats.record(action, reward, &self.board);
        self.last_mover = Some(role);
        let won = match role {
            Role::Player => player.check_for_win(&self.board),
            Role::Environment => environment.check_for_win(&self.board),
        };
        if won {
            self.winner = Some(role);
            self.state = EpisodeState::Finished;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Action, Direction},
        engine::{RandomEnvironment, RandomPlayer},
    };

    #[derive(Debug, Default)]
    struct FirstLegalPlayer {
        opened: usize,
        closed: usize,
        declare_win: bool,
    }

    impl Agent for FirstLegalPlayer {
        fn name(&self) -> &str {
            "first-legal"
        }

        fn role(&self) -> Role {
            Role::Player
        }

        fn open_episode(&mut self) {
            self.opened += 1;
        }

        fn close_episode(&mut self) {
            self.closed += 1;
        }

        fn take_action(&mut self, board: &Board) -> Option<Action> {
            Direction::ALL
                .into_iter()
                .find(|d| board.clone_and_slide(*d).is_some())
                .map(Action::Slide)
        }

        fn check_for_win(&self, _board: &Board) -> bool {
            self.declare_win
        }
    }

    #[derive(Debug)]
    struct IllegalPlayer;

    impl Agent for IllegalPlayer {
        fn name(&self) -> &str {
            "illegal"
        }

        fn role(&self) -> Role {
            Role::Player
        }

        fn take_action(&mut self, _board: &Board) -> Option<Action> {
            Some(Action::Place { cell: 0, tile: 1 })
        }
    }

    #[test]
    fn test_environment_opens_with_two_tiles() {
        let mut player = FirstLegalPlayer::default();
        let mut environment = RandomEnvironment::new("random", Some(1));
        let mut episode = Episode::new();

        assert_eq!(episode.next_turn(), Role::Environment);
        episode.step(&mut player, &mut environment);
        assert_eq!(episode.next_turn(), Role::Environment);
        episode.step(&mut player, &mut environment);
        assert_eq!(episode.board().empty_count(), Board::CELLS - 2);
        assert_eq!(episode.next_turn(), Role::Player);
        episode.step(&mut player, &mut environment);
        assert_eq!(episode.stats().slides(), 1);
        assert_eq!(episode.next_turn(), Role::Environment);
    }

    #[test]
    fn test_run_ends_when_player_is_stuck() {
        let mut player = FirstLegalPlayer::default();
        let mut environment = RandomEnvironment::new("random", Some(2));
        let mut episode = Episode::new();
        episode.run(&mut player, &mut environment);

        assert!(episode.state().is_finished());
        assert_eq!(player.opened, 1);
        assert_eq!(player.closed, 1);
        // The environment never runs out of empty cells after a legal slide,
        // so the game ends on the player's turn with no legal slide.
        assert!(!episode.board().has_legal_slide());
        assert_eq!(episode.last_mover(), Some(Role::Environment));
        assert_eq!(episode.winner(), Some(Role::Environment));
        assert_eq!(episode.stats().placements(), episode.stats().slides() + 2);
        assert!(episode.stats().score() > 0);
    }

    #[test]
    fn test_environment_stops_on_full_board() {
        let full = Board::from_exponents([1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 4, 5, 6, 7, 8]);
        let mut player = FirstLegalPlayer::default();
        let mut environment = RandomEnvironment::new("random", Some(3));
        let mut episode = Episode::from_board(full);

        let state = episode.step(&mut player, &mut environment);
        assert!(state.is_finished());
        assert_eq!(episode.stats().actions(), 0);
        assert_eq!(episode.winner(), None);
    }

    #[test]
    fn test_declared_win_ends_episode() {
        let mut player = FirstLegalPlayer {
            declare_win: true,
            ..FirstLegalPlayer::default()
        };
        let mut environment = RandomEnvironment::new("random", Some(4));
        let mut episode = Episode::new();
        episode.run(&mut player, &mut environment);

        assert_eq!(episode.stats().slides(), 1);
        assert_eq!(episode.winner(), Some(Role::Player));
    }

    #[test]
    fn test_inapplicable_action_ends_episode() {
        let mut player = IllegalPlayer;
        let mut environment = RandomEnvironment::new("random", Some(5));
        let mut episode = Episode::from_board(Board::from_exponents([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ]));
        episode.run(&mut player, &mut environment);
        assert_eq!(episode.stats().placements(), 2);
        assert_eq!(episode.stats().slides(), 0);
    }

    #[test]
    fn test_random_agents_are_reproducible() {
        let play = |seed| {
            let mut player = RandomPlayer::new("random-player", Some(seed));
            let mut environment = RandomEnvironment::new("random", Some(seed + 1));
            let mut episode = Episode::new();
            episode.run(&mut player, &mut environment);
            (*episode.board(), episode.stats().score())
        };
        assert_eq!(play(10), play(10));
    }
}
