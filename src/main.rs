//! # Queens
//!
//! `queens` is a command-line N-Queens solver. It places N queens on an N×N
//! board, one per row, and searches for a placement where no two queens share
//! a column or a diagonal.
//!
//! Two local search strategies are available:
//! 1.  **Hill climbing**: steepest-ascent passes over single-queen moves,
//!     repeated until the board is solved or a pass stops improving it.
//! 2.  **Min-conflicts**: each step applies the single move with the lowest
//!     resulting cost anywhere on the board, up to a step limit.
//!
//! Neither strategy is guaranteed to find a solution; a run that stops on a
//! local optimum reports its best attempt.
//!
//! ## Usage
//!
//! ```sh
//! queens [SUBCOMMAND] [OPTIONS]
//! ```
//!
//! ### Subcommands
//!
//! 1.  **`single`**: Solve one random board.
//!     ```sh
//!     queens single --size 8 --algorithm hill-climbing
//!     ```
//!
//! 2.  **`multi`**: Solve many random boards and print the success percentage.
//!     ```sh
//!     queens multi --trials 500 --algorithm min-conflicts --max-steps 100
//!     ```
//!
//! 3.  **`completions`**: Print a shell completion script.
//!     ```sh
//!     queens completions zsh
//!     ```
//!
//! ### Common Options
//!
//! -   `-a, --algorithm <hill-climbing|min-conflicts>`: Search strategy (default: `hill-climbing`).
//! -   `-n, --size <N>`: Board size, at least 1 (default: `8`).
//! -   `-m, --max-steps <S>`: Step limit for min-conflicts (default: `100`).
//! -   `--seed <SEED>`: Seed for board generation; omit for a fresh board each run.
//! -   `-d, --debug`: Log every search pass or step.
//! -   `-s, --stats <true|false>`: Print statistics (default: `true`).
//! -   `-p, --print-board <true|false>`: Print the initial and final boards (default: `true`).
//!
//! Logging goes to stderr and can also be controlled with `RUST_LOG`.

mod command_line;

use clap::Parser;
use command_line::cli::{Cli, Commands, print_completions, run_multi, run_single};
use tracing_subscriber::EnvFilter;

/// Global allocator using `tikv-jemallocator` for potentially better performance
/// and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(if cli.debug() { "debug" } else { "info" })
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Single { common } => run_single(&common),
        Commands::Multi { trials, common } => run_multi(trials, &common),
        Commands::Completions { shell } => print_completions(shell),
    }

    Ok(())
}
