//! Temporal-difference training of the n-tuple value network.
//!
//! This crate turns the value network of `tdl2048-evaluator` into a learning
//! player and handles everything around the trained weights.
//!
//! # How Training Works
//!
//! 1. **Play** - [`td_player::TdPlayer`] picks the afterstate maximising
//!    `reward + V(afterstate)` and records every (reward, afterstate) pair
//! 2. **Learn** - When the episode closes, the recorded afterstates are
//!    revisited from last to first; each one is adjusted toward the reward of
//!    the following move plus the freshly updated value of the following
//!    afterstate (the final one toward 0)
//! 3. **Repeat** - The same network carries over to the next episode
//!
//! # Architecture
//!
//! ```text
//! WeightInit (weights)          weight file (weight_file)
//!     ↓ fills                       ↓ loads / saves
//! NTupleNetwork (tdl2048-evaluator)
//!     ↓ owned by
//! TdPlayer (td_player)
//!     ↓ plays against
//! Environment agent (tdl2048-engine)
//! ```
//!
//! # Example
//!
//! ```
//! use tdl2048_engine::{Episode, RandomEnvironment};
//! use tdl2048_evaluator::network::NTupleNetwork;
//! use tdl2048_training::td_player::TdPlayer;
//!
//! let mut player = TdPlayer::new("td", NTupleNetwork::row_column(), 0.1);
//! let mut environment = RandomEnvironment::new("random", Some(1));
//!
//! for _ in 0..3 {
//!     let mut episode = Episode::new();
//!     episode.run(&mut player, &mut environment);
//!     assert!(episode.state().is_finished());
//! }
//! ```

pub mod td_player;
pub mod weight_file;
pub mod weights;
