//! Episode orchestration between a player and an environment.
//!
//! - [`Agent`] - Common interface of every player and environment
//! - [`RandomEnvironment`] / [`RandomPlayer`] - Seedable random agents
//! - [`Episode`] - Drives one game from an empty board to its end
//! - [`EpisodeStats`] - Score, move counts and largest tile of an episode
//!
//! # Game Flow
//!
//! 1. The environment places two initial tiles
//! 2. The player slides, then the environment places a tile
//! 3. Step 2 repeats until an agent has no action left (or a win is declared)
//!
//! # Example
//!
//! ```
//! use tdl2048_engine::{Episode, RandomEnvironment, RandomPlayer};
//!
//! let mut player = RandomPlayer::new("random-player", Some(1));
//! let mut environment = RandomEnvironment::new("random", Some(2));
//!
//! let mut episode = Episode::new();
//! episode.run(&mut player, &mut environment);
//!
//! assert!(episode.state().is_finished());
//! assert!(!episode.board().has_legal_slide());
//! ```

pub use self::{agent::*, episode::*, episode_stats::*, random_agent::*};

mod agent;
mod episode;
mod episode_stats;
mod random_agent;
