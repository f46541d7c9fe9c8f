use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PlacementError, core::direction::Direction};

/// Tile exponent stored in a cell (`0` = empty, `n` = tile value `2^n`).
pub type Cell = u8;

/// Points earned by a legal slide.
pub type Reward = u32;

const SIZE: usize = 4;
const CELLS: usize = SIZE * SIZE;

/// 4×4 board of tile exponents.
///
/// Cell `i` lies in row `i / 4` and column `i % 4`; row 0 is the top row.
/// A tile of value `2^n` is stored as the exponent `n`, so the board fits in 16
/// bytes and is copied freely by search and learning code.
///
/// # Slide kernel
///
/// Every direction is reduced to a single "slide left" routine: the board is
/// rotated clockwise until the requested direction points left, each row is
/// compacted and merged, and the board is rotated back. A slide is legal exactly
/// when it changes the board.
///
/// # Example
///
/// ```
/// use tdl2048_engine::{Board, Direction};
///
/// let mut board = Board::from_exponents([
///     0, 0, 1, 1, //
///     0, 0, 0, 0, //
///     0, 0, 0, 0, //
///     0, 0, 0, 0, //
/// ]);
///
/// assert_eq!(board.slide(Direction::Left), Some(4));
/// assert_eq!(board.cell(0), 2);
/// assert_eq!(board.slide(Direction::Left), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub const SIZE: usize = SIZE;
    pub const CELLS: usize = CELLS;
    /// Largest exponent the environment may place.
    pub const MAX_PLACED_EXPONENT: Cell = 15;
    /// Every exponent on a board is strictly below this limit.
    ///
    /// Two tiles with exponent `EXPONENT_LIMIT - 1` do not merge.
    pub const EXPONENT_LIMIT: Cell = 25;

    pub const EMPTY: Self = Self { cells: [0; CELLS] };

    /// Creates a board from raw exponents in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if any exponent is `EXPONENT_LIMIT` (25) or larger.
    #[must_use]
    pub fn from_exponents(cells: [Cell; CELLS]) -> Self {
        assert!(
            cells.iter().all(|&c| c < Self::EXPONENT_LIMIT),
            "tile exponents must be below {}",
            Self::EXPONENT_LIMIT
        );
        Self { cells }
    }

    /// Returns the exponent stored at `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    #[must_use]
    pub fn exponents(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Returns the displayed value of the tile at `index` (`0` when empty).
    #[must_use]
    pub fn tile_value(&self, index: usize) -> u32 {
        tile_value(self.cells[index])
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == 0)
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == 0).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != 0)
    }

    /// Index of the largest tile; the first one in row-major order on ties.
    #[must_use]
    pub fn max_tile_index(&self) -> usize {
        let mut best = 0;
        for (i, &c) in self.cells.iter().enumerate() {
            if c > self.cells[best] {
                best = i;
            }
        }
        best
    }

    #[must_use]
    pub fn max_exponent(&self) -> Cell {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Returns `true` if at least one direction is a legal slide.
    #[must_use]
    pub fn has_legal_slide(&self) -> bool {
        Direction::ALL
            .into_iter()
            .any(|d| self.clone_and_slide(d).is_some())
    }

    /// Places a tile with exponent `tile` on the empty cell `index`.
    pub fn place(&mut self, index: usize, tile: Cell) -> Result<(), PlacementError> {
        if index >= CELLS {
            return Err(PlacementError::OutOfRange(index));
        }
        if tile == 0 || tile > Self::MAX_PLACED_EXPONENT {
            return Err(PlacementError::InvalidTile(tile));
        }
        if self.cells[index] != 0 {
            return Err(PlacementError::Occupied(index));
        }
        self.cells[index] = tile;
        Ok(())
    }

    /// Slides all tiles toward `direction`, merging equal neighbours once.
    ///
    /// Returns the sum of the merged tile values, or `None` when the slide
    /// would not change the board. An illegal slide leaves the board untouched.
    pub fn slide(&mut self, direction: Direction) -> Option<Reward> {
        let turns = direction.quarter_turns_to_left();
        self.rotate(turns);
        let reward = self.slide_left();
        self.rotate(SIZE - turns);
        reward
    }

    /// Like [`Self::slide`], but works on a copy and returns it with the reward.
    #[must_use]
    pub fn clone_and_slide(&self, direction: Direction) -> Option<(Reward, Board)> {
        let mut after = *self;
        let reward = after.slide(direction)?;
        Some((reward, after))
    }

    fn slide_left(&mut self) -> Option<Reward> {
        let mut total = 0;
        let mut changed = false;
        for row in self.cells.chunks_exact_mut(SIZE) {
            let (merged, reward) = slide_row_left([row[0], row[1], row[2], row[3]]);
            if merged != *row {
                row.copy_from_slice(&merged);
                changed = true;
            }
            total += reward;
        }
        changed.then_some(total)
    }

    /// Rotates the board clockwise by `quarter_turns` × 90°.
    pub fn rotate(&mut self, quarter_turns: usize) {
        match quarter_turns % SIZE {
            1 => self.rotate_right(),
            2 => self.reverse(),
            3 => self.rotate_left(),
            _ => {}
        }
    }

    pub fn rotate_right(&mut self) {
        self.transpose();
        self.reflect_horizontal();
    }

    pub fn rotate_left(&mut self) {
        self.transpose();
        self.reflect_vertical();
    }

    pub fn reverse(&mut self) {
        self.reflect_horizontal();
        self.reflect_vertical();
    }

    /// Mirrors the board across its main diagonal.
    pub fn transpose(&mut self) {
        for r in 0..SIZE {
            for c in (r + 1)..SIZE {
                self.cells.swap(r * SIZE + c, c * SIZE + r);
            }
        }
    }

    /// Mirrors each row left-to-right.
    pub fn reflect_horizontal(&mut self) {
        for row in self.cells.chunks_exact_mut(SIZE) {
            row.reverse();
        }
    }

    /// Mirrors the rows top-to-bottom.
    pub fn reflect_vertical(&mut self) {
        for r in 0..SIZE / 2 {
            for c in 0..SIZE {
                self.cells.swap(r * SIZE + c, (SIZE - 1 - r) * SIZE + c);
            }
        }
    }
}

/// Compacts one row toward index 0, merging each equal pair at most once.
///
/// Tiles at the top exponent stay unmerged so the row never leaves the
/// exponent range.
fn slide_row_left(row: [Cell; SIZE]) -> ([Cell; SIZE], Reward) {
    let mut out = [0; SIZE];
    let mut len = 0;
    let mut reward = 0;
    let mut pending = None;
    for tile in row.into_iter().filter(|t| *t != 0) {
        match pending {
            Some(prev) if prev == tile && tile < Board::EXPONENT_LIMIT - 1 => {
                out[len] = tile + 1;
                len += 1;
                reward += tile_value(tile + 1);
                pending = None;
            }
            Some(prev) => {
                out[len] = prev;
                len += 1;
                pending = Some(tile);
            }
            None => pending = Some(tile),
        }
    }
    if let Some(prev) = pending {
        out[len] = prev;
    }
    (out, reward)
}

fn tile_value(exponent: Cell) -> u32 {
    if exponent == 0 { 0 } else { 1 << exponent }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{}+", "-".repeat(SIZE * 6))?;
        for row in self.cells.chunks_exact(SIZE) {
            write!(f, "|")?;
            for &c in row {
                write!(f, "{:6}", tile_value(c))?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{}+", "-".repeat(SIZE * 6))
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: [[0,2,0,0],[4,...],...] (tile values, row by row)
        let mut rows = [[0; SIZE]; SIZE];
        for (i, &c) in self.cells.iter().enumerate() {
            rows[i / SIZE][i % SIZE] = tile_value(c);
        }
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = <[[u32; SIZE]; SIZE]>::deserialize(deserializer)?;
        let mut cells = [0; CELLS];
        for (i, value) in rows.iter().flatten().copied().enumerate() {
            cells[i] = match value {
                0 => 0,
                v if v.is_power_of_two() && v.trailing_zeros() < u32::from(Self::EXPONENT_LIMIT) => {
                    #[expect(clippy::cast_possible_truncation)]
                    let exponent = v.trailing_zeros() as Cell;
                    if exponent == 0 {
                        return Err(serde::de::Error::custom(format!(
                            "invalid tile value at cell {i}: {v}"
                        )));
                    }
                    exponent
                }
                v => {
                    return Err(serde::de::Error::custom(format!(
                        "invalid tile value at cell {i}: {v}"
                    )));
                }
            };
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn board(rows: [[Cell; SIZE]; SIZE]) -> Board {
        let mut cells = [0; CELLS];
        for (i, c) in rows.iter().flatten().copied().enumerate() {
            cells[i] = c;
        }
        Board::from_exponents(cells)
    }

    fn random_board(rng: &mut Pcg32) -> Board {
        let mut cells = [0; CELLS];
        for c in &mut cells {
            *c = if rng.random_bool(0.3) {
                0
            } else {
                rng.random_range(1..=4)
            };
        }
        Board::from_exponents(cells)
    }

    #[test]
    fn test_slide_row_left() {
        assert_eq!(slide_row_left([1, 1, 0, 0]), ([2, 0, 0, 0], 4));
        assert_eq!(slide_row_left([0, 0, 0, 1]), ([1, 0, 0, 0], 0));
        assert_eq!(slide_row_left([1, 1, 1, 1]), ([2, 2, 0, 0], 8));
        assert_eq!(slide_row_left([2, 1, 1, 0]), ([2, 2, 0, 0], 4));
        assert_eq!(slide_row_left([1, 0, 1, 2]), ([2, 2, 0, 0], 4));
        assert_eq!(slide_row_left([1, 2, 3, 4]), ([1, 2, 3, 4], 0));
        assert_eq!(slide_row_left([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
    }

    #[test]
    fn test_merge_reward_is_new_tile_value() {
        let mut b = board([[3, 3, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(b.slide(Direction::Left), Some(16));
        assert_eq!(b.cell(0), 4);
    }

    #[test]
    fn test_two_tiles_merge_at_edge() {
        let mut b = board([[0, 0, 1, 1], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(b.slide(Direction::Left), Some(4));
        assert_eq!(b, board([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]));

        let mut b = board([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(b.slide(Direction::Right), Some(4));
        assert_eq!(b, board([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]));
    }

    #[test]
    fn test_top_exponent_does_not_merge() {
        let top = Board::EXPONENT_LIMIT - 1;
        assert_eq!(slide_row_left([top, top, 0, 0]), ([top, top, 0, 0], 0));
        assert_eq!(slide_row_left([0, top, 0, top]), ([top, top, 0, 0], 0));

        let mut b = board([[top, top, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(b.slide(Direction::Left), None);
        assert_eq!(b.slide(Direction::Right), Some(0));
        assert_eq!(b.max_exponent(), top);

        let mut b = board([[top - 1, top - 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(b.slide(Direction::Left), Some(1 << top));
        assert_eq!(b.cell(0), top);
    }

    #[test]
    fn test_slide_vertical() {
        let start = board([[1, 0, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 3]]);

        let mut up = start;
        assert_eq!(up.slide(Direction::Up), Some(4));
        assert_eq!(up, board([[2, 0, 0, 3], [0; 4], [0; 4], [0; 4]]));

        let mut down = start;
        assert_eq!(down.slide(Direction::Down), Some(4));
        assert_eq!(down, board([[0; 4], [0; 4], [0; 4], [2, 0, 0, 3]]));
    }

    #[test]
    fn test_moving_without_merge_is_legal() {
        let mut b = board([[0, 0, 0, 1], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(b.slide(Direction::Left), Some(0));
        assert_eq!(b.cell(0), 1);
        assert_eq!(b.cell(3), 0);
    }

    #[test]
    fn test_illegal_slide_leaves_board_unchanged() {
        let original = board([[1, 2, 3, 4], [2, 3, 4, 5], [0; 4], [0; 4]]);
        let mut b = original;
        assert_eq!(b.slide(Direction::Left), None);
        assert_eq!(b, original);
        assert_eq!(b.slide(Direction::Up), None);
        assert_eq!(b, original);
        assert!(b.slide(Direction::Down).is_some());

        let mut empty = Board::EMPTY;
        for direction in Direction::ALL {
            assert_eq!(empty.slide(direction), None);
        }
    }

    #[test]
    fn test_slide_legal_iff_board_changes() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let before = random_board(&mut rng);
            for direction in Direction::ALL {
                let mut after = before;
                let reward = after.slide(direction);
                assert_eq!(reward.is_none(), after == before, "{before}\n{direction}");
            }
        }
    }

    #[test]
    fn test_rotation_roundtrip() {
        let mut rng = Pcg32::seed_from_u64(11);
        let original = random_board(&mut rng);
        let mut b = original;
        for _ in 0..4 {
            b.rotate(1);
        }
        assert_eq!(b, original);

        b.rotate_right();
        b.rotate_left();
        assert_eq!(b, original);
    }

    #[test]
    fn test_rotate_right_moves_top_row_to_right_column() {
        let mut b = board([[1, 2, 3, 4], [0; 4], [0; 4], [0; 4]]);
        b.rotate(1);
        assert_eq!(b, board([[0, 0, 0, 1], [0, 0, 0, 2], [0, 0, 0, 3], [0, 0, 0, 4]]));
    }

    #[test]
    fn test_slide_matches_rotated_left_slide() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let before = random_board(&mut rng);
            for direction in Direction::ALL {
                let turns = direction.quarter_turns_to_left();

                let mut direct = before;
                let direct_reward = direct.slide(direction);

                let mut rotated = before;
                rotated.rotate(turns);
                let rotated_reward = rotated.slide(Direction::Left);
                rotated.rotate(SIZE - turns);

                assert_eq!(direct_reward, rotated_reward);
                assert_eq!(direct, rotated);
            }
        }
    }

    #[test]
    fn test_reward_sums_over_rows() {
        let mut b = board([[1, 1, 2, 2], [3, 3, 0, 0], [1, 2, 3, 4], [0, 5, 0, 5]]);
        assert_eq!(b.slide(Direction::Left), Some(4 + 8 + 16 + 64));
        assert_eq!(b, board([[2, 3, 0, 0], [4, 0, 0, 0], [1, 2, 3, 4], [6, 0, 0, 0]]));
    }

    #[test]
    fn test_place() {
        let mut b = Board::EMPTY;
        assert_eq!(b.place(5, 1), Ok(()));
        assert_eq!(b.cell(5), 1);
        assert_eq!(b.place(5, 2), Err(PlacementError::Occupied(5)));
        assert_eq!(b.place(16, 1), Err(PlacementError::OutOfRange(16)));
        assert_eq!(b.place(0, 0), Err(PlacementError::InvalidTile(0)));
        assert_eq!(b.place(0, 16), Err(PlacementError::InvalidTile(16)));
        assert_eq!(b.empty_count(), 15);
    }

    #[test]
    fn test_max_tile_index_prefers_first() {
        let b = board([[0, 3, 0, 0], [0; 4], [3, 0, 0, 0], [0; 4]]);
        assert_eq!(b.max_tile_index(), 1);
        assert_eq!(b.max_exponent(), 3);
        assert_eq!(Board::EMPTY.max_tile_index(), 0);
    }

    #[test]
    fn test_has_legal_slide() {
        let stuck = board([[1, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [2, 1, 2, 1]]);
        assert!(stuck.is_full());
        assert!(!stuck.has_legal_slide());

        let mergeable = board([[1, 1, 2, 3], [2, 3, 4, 5], [3, 4, 5, 6], [4, 5, 6, 7]]);
        assert!(mergeable.has_legal_slide());
    }

    #[test]
    fn test_serialize_as_tile_values() {
        let b = board([[1, 0, 0, 0], [0, 11, 0, 0], [0; 4], [0; 4]]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(
            json,
            "[[2,0,0,0],[0,2048,0,0],[0,0,0,0],[0,0,0,0]]"
        );
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, b);
    }

    #[test]
    fn test_deserialize_rejects_non_power_of_two() {
        let json = "[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]";
        let result: Result<Board, _> = serde_json::from_str(json);
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("invalid tile value"));

        let json = "[[1,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]";
        let result: Result<Board, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
