//! Core data structures of the 2048 board.
//!
//! - [`Board`] - 4×4 grid of tile exponents with the slide/merge kernel
//! - [`Direction`] - The four slide directions
//! - [`Action`] - Moves exchanged between the player and the environment

pub use self::{action::*, board::*, direction::*};

pub(crate) mod action;
pub(crate) mod board;
pub(crate) mod direction;
