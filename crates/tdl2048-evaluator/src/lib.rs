//! Board evaluation and move selection for 2048.
//!
//! This crate implements two families of move selectors on top of the engine's
//! slide kernel:
//!
//! 1. **Value-based selection** ([`network`], [`n_tuple`]) - An n-tuple network
//!    estimates the value of every afterstate; the move maximising
//!    `reward + value` is chosen.
//!
//! 2. **Rule-based selection** ([`greedy`], [`two_ply`], [`heuristic`]) -
//!    Stateless policies that score moves directly from slide rewards and
//!    board shape.
//!
//! # Architecture
//!
//! ```text
//! PolicyPlayer (Agent)
//!     ↓ uses
//! MoveSelector (greedy / two-ply / heuristic / value)
//!     ↓ uses
//! Board::slide (afterstates)  +  NTupleNetwork::estimate (value selector only)
//! ```
//!
//! The TD learner that trains the network lives in `tdl2048-training`; it
//! shares [`move_selector::best_afterstate`] with [`move_selector::ValueSelector`]
//! so that inference and learning choose moves identically.
//!
//! # Example
//!
//! ```
//! use tdl2048_engine::{Board, Direction};
//! use tdl2048_evaluator::{greedy::GreedySelector, move_selector::MoveSelector};
//!
//! let board = Board::from_exponents([1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
//! assert_eq!(GreedySelector.select_move(&board), Some(Direction::Left));
//! ```

pub mod greedy;
pub mod heuristic;
pub mod move_selector;
pub mod n_tuple;
pub mod network;
pub mod policy_player;
pub mod two_ply;
