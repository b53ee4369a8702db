//! Error handling for codequal
//!
//! This module provides the error handling system for the analyzer,
//! including error types, result aliases, and error context utilities.

pub mod context;
pub mod types;

pub use context::{log_recovered, ResultExt};
pub use types::{CodequalError, ErrorSeverity, Result};
