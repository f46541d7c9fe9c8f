pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a tile placement can be rejected by [`Board::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("cell index {_0} is outside the board")]
    OutOfRange(#[error(not(source))] usize),
    #[display("cell {_0} is already occupied")]
    Occupied(#[error(not(source))] usize),
    #[display("tile exponent {_0} is not placeable")]
    InvalidTile(#[error(not(source))] u8),
}
