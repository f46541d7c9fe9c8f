//! Aggregated results of many episodes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tdl2048_engine::{Board, EpisodeStats};

const EXPONENTS: usize = Board::EXPONENT_LIMIT as usize;

/// Scores and largest tiles of a group of finished episodes.
#[derive(Debug, Clone)]
pub struct ScoreStats {
    episodes: usize,
    total_score: u64,
    max_score: u64,
    actions: usize,
    /// Number of episodes by the exponent of their largest tile.
    max_tiles: [usize; EXPONENTS],
}

impl Default for ScoreStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            episodes: 0,
            total_score: 0,
            max_score: 0,
            actions: 0,
            max_tiles: [0; EXPONENTS],
        }
    }

    pub fn record(&mut self, stats: &EpisodeStats) {
        self.episodes += 1;
        self.total_score += stats.score();
        self.max_score = self.max_score.max(stats.score());
        self.actions += stats.actions();
        self.max_tiles[usize::from(stats.max_exponent())] += 1;
    }

    #[must_use]
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    #[must_use]
    pub fn actions(&self) -> usize {
        self.actions
    }

    #[must_use]
    pub fn max_score(&self) -> u64 {
        self.max_score
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn mean_score(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.episodes as f64
    }

    /// Per-tile reach rates, from the smallest largest-tile seen upwards.
    #[must_use]
    pub fn tile_reach(&self) -> Vec<TileReach> {
        let Some(first) = self.max_tiles.iter().position(|&n| n > 0) else {
            return vec![];
        };
        let last = self.max_tiles.iter().rposition(|&n| n > 0).unwrap_or(first);
        let mut reached = self.max_tiles[first..].iter().sum::<usize>();
        let mut rows = Vec::with_capacity(last - first + 1);
        for exponent in first..=last {
            let ended = self.max_tiles[exponent];
            rows.push(TileReach {
                tile: tile_value(exponent),
                reached: self.rate(reached),
                ended: self.rate(ended),
            });
            reached -= ended;
        }
        rows
    }

    #[expect(clippy::cast_precision_loss)]
    fn rate(&self, count: usize) -> f64 {
        count as f64 / self.episodes as f64
    }
}

fn tile_value(exponent: usize) -> u32 {
    match exponent {
        0 => 0,
        e => 1 << e,
    }
}

/// Share of episodes whose largest tile was at least (`reached`) or exactly
/// (`ended`) this tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileReach {
    pub tile: u32,
    pub reached: f64,
    pub ended: f64,
}

/// Logs the statistics of one block of episodes.
pub fn log_block(end: usize, stats: &ScoreStats, seconds: f64) {
    #[expect(clippy::cast_precision_loss)]
    let ops = if seconds > 0.0 {
        stats.actions() as f64 / seconds
    } else {
        0.0
    };
    log::info!(
        "{end}\tavg = {:.0}\tmax = {}\tops = {ops:.0}",
        stats.mean_score(),
        stats.max_score()
    );
    for row in stats.tile_reach() {
        log::info!(
            "\t{}\t{:.1}%\t({:.1}%)",
            row.tile,
            row.reached * 100.0,
            row.ended * 100.0
        );
    }
}

/// Final record of a run, written as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub player: String,
    pub environment: String,
    pub episodes: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub mean_score: f64,
    pub max_score: u64,
    pub tile_reach: Vec<TileReach>,
    /// Final board of the highest-scoring episode.
    pub best_board: Option<Board>,
}

/// Highest-scoring episode seen so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestEpisode {
    score: u64,
    board: Option<Board>,
}

impl BestEpisode {
    pub fn offer(&mut self, score: u64, board: &Board) {
        if self.board.is_none() || score > self.score {
            self.score = score;
            self.board = Some(*board);
        }
    }

    #[must_use]
    pub fn board(&self) -> Option<Board> {
        self.board
    }
}
