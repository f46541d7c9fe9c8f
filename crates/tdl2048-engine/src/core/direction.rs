/// Slide direction of a player move.
///
/// Directions are encoded `0..4` in the order up, right, down, left, which is the
/// opcode order used by the action codes and by every policy that enumerates moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Direction {
    #[display("up")]
    Up = 0,
    #[display("right")]
    Right = 1,
    #[display("down")]
    Down = 2,
    #[display("left")]
    Left = 3,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the direction encoded by `code`, if any.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Up),
            1 => Some(Self::Right),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of clockwise quarter turns that make this direction point left.
    ///
    /// Sliding in `self` is the same as rotating the board clockwise by this
    /// amount, sliding left, and rotating back.
    #[must_use]
    pub const fn quarter_turns_to_left(self) -> usize {
        (Self::Left as usize + Self::LEN - self as usize) % Self::LEN
    }
}
