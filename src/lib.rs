#![deny(missing_docs)]
//! This crate solves the N-Queens puzzle with local search: steepest-ascent hill climbing and min-conflicts.

/// The `queens` module holds the board model, the two search strategies and the code that drives them.
pub mod queens;
