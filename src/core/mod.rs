//! Core functionality for walking, analyzing and scoring a project

pub mod aggregator;
pub mod analyzer;
pub mod parallel;
pub mod walker;

pub use analyzer::ProjectAnalyzer;
pub use parallel::{CancellationToken, ProgressUpdate};
pub use walker::{SourceWalker, WalkOutcome};
