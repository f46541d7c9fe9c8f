//! Episode loop shared by the `train` and `play` commands.

use std::time::Instant;

use chrono::Utc;
use tdl2048_engine::{Agent, Episode};

use crate::summary::{BestEpisode, RunSummary, ScoreStats, log_block};

/// Plays `total` episodes, logging statistics every `block` episodes.
pub fn run_episodes(
    player: &mut dyn Agent,
    environment: &mut dyn Agent,
    total: usize,
    block: usize,
) -> RunSummary {
    let block = block.max(1);
    let started_at = Utc::now();
    let mut overall = ScoreStats::new();
    let mut current = ScoreStats::new();
    let mut best = BestEpisode::default();
    let mut block_start = Instant::now();

    for count in 1..=total {
        let mut episode = Episode::new();
        episode.run(player, environment);
        log::debug!(
            "episode {count}: score {}, max tile {}, winner {}",
            episode.stats().score(),
            episode.stats().max_tile(),
            episode
                .winner()
                .map_or_else(|| "none".to_owned(), |role| role.to_string())
        );

        overall.record(episode.stats());
        current.record(episode.stats());
        best.offer(episode.stats().score(), episode.board());

        if count % block == 0 || count == total {
            log_block(count, &current, block_start.elapsed().as_secs_f64());
            current = ScoreStats::new();
            block_start = Instant::now();
        }
    }

    RunSummary {
        player: player.name().to_owned(),
        environment: environment.name().to_owned(),
        episodes: overall.episodes(),
        started_at,
        finished_at: Utc::now(),
        mean_score: overall.mean_score(),
        max_score: overall.max_score(),
        tile_reach: overall.tile_reach(),
        best_board: best.board(),
    }
}

#[cfg(test)]
mod tests {
    use tdl2048_engine::{RandomEnvironment, RandomPlayer};

    use super::*;

    #[test]
    fn test_run_episodes() {
        let mut player = RandomPlayer::new("random-player", Some(1));
        let mut environment = RandomEnvironment::new("random", Some(2));
        let summary = run_episodes(&mut player, &mut environment, 5, 2);

        assert_eq!(summary.player, "random-player");
        assert_eq!(summary.environment, "random");
        assert_eq!(summary.episodes, 5);
        assert!(summary.started_at <= summary.finished_at);
        assert!(summary.mean_score <= summary.max_score as f64);
        assert_eq!(summary.tile_reach.first().map(|r| r.reached), Some(1.0));
        assert!(summary.best_board.is_some_and(|b| !b.has_legal_slide()));
    }

    #[test]
    fn test_zero_episodes() {
        let mut player = RandomPlayer::new("random-player", Some(1));
        let mut environment = RandomEnvironment::new("random", Some(2));
        let summary = run_episodes(&mut player, &mut environment, 0, 10);
        assert_eq!(summary.episodes, 0);
        assert!(summary.tile_reach.is_empty());
        assert_eq!(summary.best_board, None);
    }
}
