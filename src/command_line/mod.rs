//! Command-line front end: argument parsing, run orchestration and reporting.

pub(crate) mod cli;
