//! N-tuple network: a sum of independent lookup tables.
//!
//! Each tuple pattern owns one dense table of [`FEATURE_SPACE`] weights. The
//! value of a board is the sum, over all patterns, of the weight stored at the
//! pattern's feature index:
//!
//! ```text
//! V(s) = Σ_g table_g[feature(s, g)]
//! ```
//!
//! This is a linear model over a one-hot-per-pattern feature expansion, so a
//! gradient step toward a target touches exactly one weight per table.

use std::ops::{Index, IndexMut};

use tdl2048_engine::Board;

use crate::n_tuple::{FEATURE_SPACE, ROW_COLUMN_PATTERNS, TuplePattern, feature_index};

/// Shape problems detected when building a network from existing tables.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum NetworkShapeError {
    #[display("expected {expected} weight tables, found {found}")]
    TableCount { expected: usize, found: usize },
    #[display("weight table #{index} has {found} entries, expected {expected}")]
    TableSize {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Dense weight table of one tuple pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: Vec<f32>,
}

impl WeightTable {
    /// Creates a table of `len` zero weights.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            weights: vec![0.0; len],
        }
    }

    #[must_use]
    pub fn from_vec(weights: Vec<f32>) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.weights
    }
}

impl Index<usize> for WeightTable {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.weights[index]
    }
}

impl IndexMut<usize> for WeightTable {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.weights[index]
    }
}

/// Value approximator built from tuple patterns and their weight tables.
///
/// # Example
///
/// ```
/// use tdl2048_engine::Board;
/// use tdl2048_evaluator::network::NTupleNetwork;
///
/// let mut network = NTupleNetwork::row_column();
/// let board = Board::from_exponents([1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
///
/// assert_eq!(network.estimate(&board), 0.0);
/// network.adjust(&board, 8.0, 0.0625);
/// assert_eq!(network.estimate(&board), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NTupleNetwork {
    patterns: Vec<TuplePattern>,
    tables: Vec<WeightTable>,
}

impl NTupleNetwork {
    /// Creates a network with one zeroed table per pattern.
    #[must_use]
    pub fn new(patterns: Vec<TuplePattern>) -> Self {
        let tables = patterns
            .iter()
            .map(|_| WeightTable::zeros(FEATURE_SPACE))
            .collect();
        Self { patterns, tables }
    }

    /// Creates the reference network: four rows and four columns.
    #[must_use]
    pub fn row_column() -> Self {
        Self::new(ROW_COLUMN_PATTERNS.to_vec())
    }

    /// Creates a network from previously trained tables.
    ///
    /// Fails if the number of tables does not match the number of patterns or
    /// if any table does not cover the full feature space.
    pub fn from_tables(
        patterns: Vec<TuplePattern>,
        tables: Vec<WeightTable>,
    ) -> Result<Self, NetworkShapeError> {
        if tables.len() != patterns.len() {
            return Err(NetworkShapeError::TableCount {
                expected: patterns.len(),
                found: tables.len(),
            });
        }
        if let Some((index, table)) = tables
            .iter()
            .enumerate()
            .find(|(_, t)| t.len() != FEATURE_SPACE)
        {
            return Err(NetworkShapeError::TableSize {
                index,
                expected: FEATURE_SPACE,
                found: table.len(),
            });
        }
        Ok(Self { patterns, tables })
    }

    #[must_use]
    pub fn patterns(&self) -> &[TuplePattern] {
        &self.patterns
    }

    #[must_use]
    pub fn tables(&self) -> &[WeightTable] {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut [WeightTable] {
        &mut self.tables
    }

    /// Estimated value of `board`.
    #[must_use]
    pub fn estimate(&self, board: &Board) -> f32 {
        self.patterns
            .iter()
            .zip(&self.tables)
            .map(|(pattern, table)| table[feature_index(board, pattern)])
            .sum()
    }

    /// Moves the estimate of `board` toward `target` with step size `alpha`.
    ///
    /// The error `target - estimate(board)` is computed once from the current
    /// weights and the same `alpha * error` is added to the active weight of
    /// every table. Returns the error.
    pub fn adjust(&mut self, board: &Board, target: f32, alpha: f32) -> f32 {
        let error = target - self.estimate(board);
        let delta = alpha * error;
        for (pattern, table) in self.patterns.iter().zip(&mut self.tables) {
            table[feature_index(board, pattern)] += delta;
        }
        error
    }
}
