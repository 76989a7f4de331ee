//! Command-line interface for liner-notes.
//!
//! Runs the HTTP server by default, or resolves a single artist, album or
//! search from the terminal and prints the JSON result.

mod commands;

pub use commands::{Cli, Commands, run_command};
