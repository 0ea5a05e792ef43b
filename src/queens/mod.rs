#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! N-Queens board model and local search.

/// Board state, occupancy grid and conflict evaluation.
pub mod board;

/// Hill-climbing and min-conflicts search.
pub mod search;

/// Configuration record and search driver.
pub mod solver;

/// Batches of independent trials.
pub mod batch;
