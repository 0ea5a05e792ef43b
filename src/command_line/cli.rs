#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use queens_solver::queens::batch::{BatchReport, run_trials};
use queens_solver::queens::board::Board;
use queens_solver::queens::solver::{
    Algorithm, DEFAULT_MAX_STEPS, DEFAULT_SIZE, SearchConfig, SolutionStats, solve,
};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::info;

/// Defines the command-line interface for the queens solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "queens", version, about = "An N-Queens local search solver")]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute (`single`, `multi` or `completions`).
    #[clap(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the selected subcommand asked for debug output.
    pub(crate) const fn debug(&self) -> bool {
        match &self.command {
            Commands::Single { common } | Commands::Multi { common, .. } => common.debug,
            Commands::Completions { .. } => false,
        }
    }
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve one random board and print the result.
    Single {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve many random boards and report how many were solved.
    Multi {
        /// Number of boards to try.
        #[arg(short, long, default_value_t = 100)]
        trials: usize,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, logging every search pass or step.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable printing of search statistics after solving.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) stats: bool,

    /// Enable printing of the initial and final boards.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) print_board: bool,

    /// The local search strategy to use.
    #[arg(short, long, default_value_t = Algorithm::HillClimbing)]
    pub(crate) algorithm: Algorithm,

    /// Board size, which is also the number of queens.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIZE, value_parser = parse_board_size)]
    pub(crate) size: usize,

    /// Maximum number of min-conflicts steps before giving up.
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    pub(crate) max_steps: usize,

    /// Seed for the random board generator. Omit for a different board every run.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

impl CommonOptions {
    /// Converts the options into the search configuration record.
    pub(crate) const fn config(&self) -> SearchConfig {
        SearchConfig {
            algorithm: self.algorithm,
            size: self.size,
            max_steps: self.max_steps,
            seed: self.seed,
        }
    }
}

/// Parses a board size, rejecting zero.
pub(crate) fn parse_board_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .parse()
        .map_err(|e| format!("`{s}` is not a board size: {e}"))?;
    if size == 0 {
        return Err("board size must be at least 1".to_string());
    }
    Ok(size)
}

/// Writes a completion script for `shell` to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

/// Solves one random board and reports the outcome.
pub(crate) fn run_single(common: &CommonOptions) {
    let config = common.config();
    let mut rng = config.rng();
    let initial = config.initial_board(&mut rng);

    if common.print_board {
        println!("Initial board:\n{initial}");
    }

    let time = Instant::now();
    let (solution, solution_stats) = solve(&initial, &config);
    let elapsed = time.elapsed();

    info!(
        algorithm = %config.algorithm,
        solved = solution.is_solved(),
        cost = solution.cost(),
        "search complete"
    );

    if !solution.is_solved() {
        match config.algorithm {
            Algorithm::HillClimbing => println!(
                "\nHill-climbing search could not find a solution. Showing best attempt."
            ),
            Algorithm::MinConflicts => println!(
                "\nMin-conflicts could not find a solution in {} steps. Showing best attempt.",
                config.max_steps
            ),
        }
    }

    if common.print_board {
        println!("\nResult of search:\n{solution}");
    }

    if common.stats {
        print_stats(&config, &solution, &solution_stats, elapsed);
    }
}

/// Runs a batch of trials and prints the share solved.
pub(crate) fn run_multi(trials: usize, common: &CommonOptions) {
    let config = common.config();
    info!(trials, algorithm = %config.algorithm, size = config.size, "running batch");

    let report = run_trials(&config, trials);

    println!(
        "Percent of tests successfully solved: {:.0}%",
        report.success_percentage()
    );

    if common.stats {
        print_batch_stats(&config, &report);
    }
}

/// Reads allocated and resident memory from jemalloc, in MiB.
fn memory_usage() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;

    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().and_then(|m| m.read()).ok()?;
    let resident = stats::resident::mib().and_then(|m| m.read()).ok()?;

    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

fn print_memory_lines() {
    match memory_usage() {
        Some((allocated, resident)) => {
            stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
            stat_line("Resident memory (MiB)", format!("{resident:.2}"));
        }
        None => {
            stat_line("Memory usage (MiB)", "n/a");
            stat_line("Resident memory (MiB)", "n/a");
        }
    }
}

/// Prints a summary of problem and search statistics for one run.
pub(crate) fn print_stats(
    config: &SearchConfig,
    solution: &Board,
    s: &SolutionStats,
    elapsed: Duration,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Algorithm", config.algorithm);
    stat_line("Board size", solution.size());
    stat_line("Initial cost", s.initial_cost);

    println!("========================[ Search Statistics ]========================");
    match config.algorithm {
        Algorithm::HillClimbing => stat_line_with_rate("Climbs", s.climbs, elapsed_secs),
        Algorithm::MinConflicts => stat_line_with_rate("Steps", s.steps, elapsed_secs),
    }
    stat_line("Final cost", s.final_cost);
    print_memory_lines();
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solution.is_solved() {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVED");
    }
}

/// Prints a summary of a batch of trials.
pub(crate) fn print_batch_stats(config: &SearchConfig, report: &BatchReport) {
    let elapsed_secs = report.elapsed.as_secs_f64();

    println!("\n========================[ Batch Statistics ]=========================");
    stat_line("Algorithm", config.algorithm);
    stat_line("Board size", config.size);
    stat_line_with_rate("Trials", report.trials, elapsed_secs);
    stat_line("Solved", report.solved);
    stat_line(
        "Success rate (%)",
        format!("{:.2}", report.success_percentage()),
    );
    print_memory_lines();
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
