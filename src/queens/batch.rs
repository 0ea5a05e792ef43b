//! Repeated trials on fresh random boards.

use crate::queens::board::Board;
use crate::queens::solver::{SearchConfig, solve};
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of a batch of independent trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    /// Number of trials run.
    pub trials: usize,
    /// Number of trials that ended on a solved board.
    pub solved: usize,
    /// Wall-clock time spent on the whole batch.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Share of solved trials, from 0 to 100. Zero when no trial ran.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_percentage(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.solved as f64 * 100.0 / self.trials as f64
    }
}

/// Runs `trials` searches, each on its own random board.
///
/// With a seed in `config`, trial `i` draws its board from a generator seeded
/// with `seed + i`, so the whole batch is reproducible. Without one, every
/// trial draws from entropy.
#[must_use]
pub fn run_trials(config: &SearchConfig, trials: usize) -> BatchReport {
    let start = Instant::now();

    let solved = (0..trials)
        .filter(|&trial| {
            let mut rng = trial_rng(config.seed, trial);
            let board = Board::new_random(config.size, &mut rng);
            let (result, stats) = solve(&board, config);
            debug!(
                trial,
                initial_cost = stats.initial_cost,
                final_cost = stats.final_cost,
                "trial finished"
            );
            result.is_solved()
        })
        .count();

    BatchReport {
        trials,
        solved,
        elapsed: start.elapsed(),
    }
}

fn trial_rng(seed: Option<u64>, trial: usize) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, |seed| {
        fastrand::Rng::with_seed(seed.wrapping_add(trial as u64))
    })
}
