//! Drives a search run from a configuration record.
//!
//! `SearchConfig` holds everything a caller chooses up front (algorithm,
//! board size, step budget and seed) so that nothing in the search depends on
//! process-wide state. `solve` dispatches on the algorithm and reports the
//! resulting board together with `SolutionStats`.

use crate::queens::board::Board;
use crate::queens::search::{hill_climbing, min_conflicts_counted};
use clap::ValueEnum;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

/// The local search strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Algorithm {
    /// Steepest-ascent hill climbing, repeated until the cost stops improving.
    #[default]
    HillClimbing,
    /// Min-conflicts with a bounded number of steps.
    MinConflicts,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::HillClimbing => "hill-climbing",
            Self::MinConflicts => "min-conflicts",
        })
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hill-climbing" | "hill" => Ok(Self::HillClimbing),
            "min-conflicts" | "min" => Ok(Self::MinConflicts),
            _ => Err(format!("Unknown algorithm: {s}")),
        }
    }
}

/// Default board size, the classic eight queens.
pub const DEFAULT_SIZE: usize = 8;

/// Default step budget for min-conflicts.
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Everything needed to set up and run one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Which strategy to run.
    pub algorithm: Algorithm,
    /// Side length of generated boards.
    pub size: usize,
    /// Step budget for min-conflicts. Hill climbing ignores it.
    pub max_steps: usize,
    /// Seed for board generation. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            size: DEFAULT_SIZE,
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// A random number generator seeded from this configuration.
    #[must_use]
    pub fn rng(&self) -> fastrand::Rng {
        self.seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }

    /// A random board of the configured size.
    ///
    /// # Panics
    ///
    /// If the configured size is zero.
    #[must_use]
    pub fn initial_board(&self, rng: &mut fastrand::Rng) -> Board {
        Board::new_random(self.size, rng)
    }
}

/// Counters collected during one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Hill-climbing passes run.
    pub climbs: usize,
    /// Min-conflicts moves applied.
    pub steps: usize,
    /// Cost of the board the search started from.
    pub initial_cost: usize,
    /// Cost of the board the search returned.
    pub final_cost: usize,
}

/// Repeats [`hill_climbing`], each pass starting from the previous result,
/// until the board is solved or a pass leaves the cost unchanged.
///
/// Returns the final board and the number of passes run.
#[must_use]
pub fn climb_to_plateau(initial: &Board) -> (Board, usize) {
    let mut current = initial.clone();
    let mut climbs = 0;

    loop {
        let previous = current;
        current = hill_climbing(&previous);
        climbs += 1;
        debug!(climbs, cost = current.cost(), "hill climbing pass");

        if current.is_solved() || previous.cost() == current.cost() {
            return (current, climbs);
        }
    }
}

/// Runs the configured algorithm on `initial`.
#[must_use]
pub fn solve(initial: &Board, config: &SearchConfig) -> (Board, SolutionStats) {
    debug!(
        algorithm = %config.algorithm,
        size = initial.size(),
        cost = initial.cost(),
        "starting search"
    );

    let mut stats = SolutionStats {
        initial_cost: initial.cost(),
        ..SolutionStats::default()
    };

    let board = match config.algorithm {
        Algorithm::HillClimbing => {
            let (board, climbs) = climb_to_plateau(initial);
            stats.climbs = climbs;
            board
        }
        Algorithm::MinConflicts => {
            let (board, steps) = min_conflicts_counted(initial, config.max_steps);
            stats.steps = steps;
            board
        }
    };

    stats.final_cost = board.cost();
    debug!(solved = board.is_solved(), cost = board.cost(), "search finished");

    (board, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_round_trip() {
        for algorithm in [Algorithm::HillClimbing, Algorithm::MinConflicts] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("MIN".parse::<Algorithm>(), Ok(Algorithm::MinConflicts));
        assert!("annealing".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.algorithm, Algorithm::HillClimbing);
        assert_eq!(config.size, 8);
        assert_eq!(config.max_steps, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_seeded_config_is_reproducible() {
        let config = SearchConfig {
            seed: Some(99),
            ..SearchConfig::default()
        };
        let a = config.initial_board(&mut config.rng());
        let b = config.initial_board(&mut config.rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_climb_to_plateau_solves() {
        let board = Board::from_queens(&[1, 0, 3, 2]);
        let (result, climbs) = climb_to_plateau(&board);
        assert_eq!(result.queens(), &[2, 0, 3, 1]);
        assert!(result.is_solved());
        assert_eq!(climbs, 3);
    }

    #[test]
    fn test_climb_to_plateau_stops_on_plateau() {
        let board = Board::from_queens(&[0, 0, 0, 0]);
        let (result, climbs) = climb_to_plateau(&board);
        assert_eq!(result.queens(), &[2, 0, 3, 3]);
        assert_eq!(result.cost(), 2);
        assert_eq!(climbs, 3);
    }

    #[test]
    fn test_climb_to_plateau_solved_input() {
        let board = Board::from_queens(&[1, 3, 0, 2]);
        let (result, climbs) = climb_to_plateau(&board);
        assert_eq!(result, board);
        assert_eq!(climbs, 1);
    }

    #[test]
    fn test_solve_min_conflicts_stats() {
        let config = SearchConfig {
            algorithm: Algorithm::MinConflicts,
            size: 4,
            max_steps: 50,
            seed: None,
        };
        let board = Board::from_queens(&[0, 0, 0, 0]);
        let (result, stats) = solve(&board, &config);
        assert!(result.is_solved());
        assert_eq!(
            stats,
            SolutionStats {
                climbs: 0,
                steps: 3,
                initial_cost: 12,
                final_cost: 0,
            }
        );
    }

    #[test]
    fn test_solve_hill_climbing_stats() {
        let config = SearchConfig {
            size: 4,
            ..SearchConfig::default()
        };
        let board = Board::from_queens(&[1, 0, 3, 2]);
        let (result, stats) = solve(&board, &config);
        assert!(result.is_solved());
        assert_eq!(stats.climbs, 3);
        assert_eq!(stats.steps, 0);
        assert_eq!(stats.initial_cost, 8);
        assert_eq!(stats.final_cost, 0);
    }
}
