//! Command-line interface components

pub mod args;
pub mod commands;

pub use args::Args;
pub use commands::{Command, EXIT_CRITICAL, EXIT_ERROR, EXIT_OK, EXIT_SCORE_BELOW_THRESHOLD};
