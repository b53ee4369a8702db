//! codequal - project-wide static analysis for Java source trees
//!
//! Walks a project root, parses every `.java` file with tree-sitter, builds a
//! type-level dependency graph and runs structural detectors (unused public
//! types, dependency cycles, oversized and deep packages) plus per-method
//! checks, folding everything into metrics and a 0-100 quality score.
//!
//! ```no_run
//! use codequal::{ProjectAnalyzer, Settings};
//!
//! let settings = Settings {
//!     scan_path: "path/to/project".into(),
//!     ..Default::default()
//! };
//! let result = ProjectAnalyzer::new(settings).analyze()?;
//! println!("score: {}", result.metrics.score);
//! # Ok::<(), codequal::CodequalError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod detectors;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{CancellationToken, ProjectAnalyzer, SourceWalker};
pub use error::{log_recovered, CodequalError, ErrorSeverity, Result, ResultExt};
pub use models::{
    analysis::{AnalysisResult, FileSummary, ProjectMetrics},
    config::{OutputFormat, Settings},
    issue::{FileIssue, IssueCode, ProjectIssue, Severity},
};
pub use parsers::{JavaParser, ParseOutcome, SourceParser};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
