//! Construction of agents from their configuration.

use anyhow::{Context as _, ensure};
use tdl2048_engine::{Agent, RandomEnvironment, RandomPlayer, Role, agent_rng};
use tdl2048_evaluator::{
    greedy::GreedySelector, heuristic::HeuristicSelector, move_selector::MoveSelector,
    n_tuple::ROW_COLUMN_PATTERNS, network::NTupleNetwork, policy_player::PolicyPlayer,
    two_ply::TwoPlySelector,
};
use tdl2048_training::{td_player::TdPlayer, weight_file};

use crate::config::{AgentConfig, Policy};

/// Player built from a configuration.
#[derive(Debug)]
pub enum Player {
    Learner(TdPlayer),
    Policy(PolicyPlayer),
    Random(RandomPlayer),
}

impl Player {
    pub fn from_config(config: &AgentConfig) -> anyhow::Result<Self> {
        ensure!(
            config.role == Role::Player,
            "agent {:?} has role {}, expected {}",
            config.name,
            config.role,
            Role::Player
        );
        let selector: Box<dyn MoveSelector> = match config.policy {
            Policy::Td => {
                let network = build_network(config)?;
                let player = TdPlayer::new(&config.name, network, config.alpha)
                    .with_win_tile(config.win);
                return Ok(Self::Learner(player));
            }
            Policy::Random => {
                let player = RandomPlayer::new(&config.name, config.seed).with_win_tile(config.win);
                return Ok(Self::Random(player));
            }
            Policy::Greedy => Box::new(GreedySelector),
            Policy::TwoPly => Box::new(TwoPlySelector),
            Policy::Heuristic => Box::new(HeuristicSelector::from_preset(config.preset)),
        };
        let player = PolicyPlayer::new(&config.name, selector).with_win_tile(config.win);
        Ok(Self::Policy(player))
    }

    pub fn as_agent_mut(&mut self) -> &mut dyn Agent {
        match self {
            Self::Learner(player) => player,
            Self::Policy(player) => player,
            Self::Random(player) => player,
        }
    }

    /// The learning player, if this is one.
    pub fn learner(&self) -> Option<&TdPlayer> {
        match self {
            Self::Learner(player) => Some(player),
            _ => None,
        }
    }
}

pub fn build_environment(config: &AgentConfig) -> anyhow::Result<RandomEnvironment> {
    ensure!(
        config.role == Role::Environment,
        "agent {:?} has role {}, expected {}",
        config.name,
        config.role,
        Role::Environment
    );
    Ok(RandomEnvironment::new(&config.name, config.seed))
}

/// Initialises the value network, then replaces it with the `load` file if one is given.
pub fn build_network(config: &AgentConfig) -> anyhow::Result<NTupleNetwork> {
    if let Some(path) = &config.load {
        return weight_file::load(path, ROW_COLUMN_PATTERNS.to_vec())
            .with_context(|| format!("Failed to load weights: {}", path.display()));
    }
    let mut network = NTupleNetwork::row_column();
    config.init.apply(&mut network, &mut agent_rng(config.seed));
    log::debug!("initialised weights of {} with {}", config.name, config.init);
    Ok(network)
}

/// Writes the learner's weights to the `save` path, if both exist.
pub fn save_weights(config: &AgentConfig, player: &Player) -> anyhow::Result<()> {
    let Some(path) = &config.save else {
        return Ok(());
    };
    let Some(learner) = player.learner() else {
        log::warn!(
            "{} uses the {} policy and has no weights to save",
            config.name,
            config.policy
        );
        return Ok(());
    };
    weight_file::save(path, learner.network())
        .with_context(|| format!("Failed to save weights: {}", path.display()))
}
