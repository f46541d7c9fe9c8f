//! Feature hashing of board cell patterns.
//!
//! An n-tuple is an ordered group of cells. Its feature index reads the
//! exponents of those cells as the digits of a base-25 number, most
//! significant digit first, so every local pattern of four tiles gets its own
//! slot in a dense weight table.
//!
//! The same function is used when estimating values and when updating
//! weights; any divergence between the two call sites would train one
//! pattern and read another.

use tdl2048_engine::Board;

/// Number of cells per tuple.
pub const TUPLE_LEN: usize = 4;

/// Radix of the feature index; every board exponent is below it.
pub const FEATURE_BASE: usize = Board::EXPONENT_LIMIT as usize;

/// Number of distinct feature indices of one tuple (`25^4`).
#[expect(clippy::cast_possible_truncation)]
pub const FEATURE_SPACE: usize = FEATURE_BASE.pow(TUPLE_LEN as u32);

/// Ordered cell indices of one tuple.
pub type TuplePattern = [usize; TUPLE_LEN];

/// Four rows followed by four columns.
pub const ROW_COLUMN_PATTERNS: [TuplePattern; 8] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
];

/// Returns the feature index of `pattern` on `board`, in `0..FEATURE_SPACE`.
#[inline]
#[must_use]
pub fn feature_index(board: &Board, pattern: &TuplePattern) -> usize {
    pattern.iter().fold(0, |index, &cell| {
        index * FEATURE_BASE + usize::from(board.cell(cell))
    })
}
