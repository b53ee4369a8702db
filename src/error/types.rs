//! Error types and definitions for codequal
//!
//! This module provides the error handling system for the analyzer,
//! including error types, result aliases, and severity classification.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for codequal operations
#[derive(Debug, Error)]
pub enum CodequalError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a single source file
    #[error("Error reading source file {path}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// The project root does not exist or is not a directory
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// The project root exists but cannot be listed
    #[error("Cannot read project root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSerialize {
        #[source]
        source: toml::ser::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// Generic analysis failure with context
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// The Java grammar could not be loaded into the parser
    #[error("Parser setup error: {message}")]
    ParserSetup { message: String },

    /// Parallel execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// Interrupted operation
    #[error("Operation interrupted")]
    Interrupted,

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl CodequalError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            CodequalError::PermissionDenied { .. } => ErrorSeverity::Warning,
            CodequalError::IoRead { .. } => ErrorSeverity::Warning,
            CodequalError::DirectoryTraversal { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            CodequalError::InvalidPath { .. } => ErrorSeverity::Critical,
            CodequalError::RootUnreadable { .. } => ErrorSeverity::Critical,
            CodequalError::Config { .. } => ErrorSeverity::Critical,
            CodequalError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            CodequalError::ConfigRead { .. } => ErrorSeverity::Critical,
            CodequalError::ConfigParse { .. } => ErrorSeverity::Critical,
            CodequalError::ParserSetup { .. } => ErrorSeverity::Critical,
            CodequalError::StdoutWrite { .. } => ErrorSeverity::Critical,
            CodequalError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CodequalError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            CodequalError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            CodequalError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing project directory.", path.display())
            }
            CodequalError::RootUnreadable { path, source } => {
                format!("Cannot list project root '{}': {}.", path.display(), source)
            }
            CodequalError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            CodequalError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            CodequalError::Interrupted => "Analysis was cancelled before it completed.".to_string(),
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Suggested next step for the user, if there is an obvious one
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            CodequalError::InvalidPath { .. } | CodequalError::RootUnreadable { .. } => {
                Some("Check that the path exists and is accessible")
            }
            CodequalError::ConfigNotFound { .. } => Some(
                "Create a .codequal.toml file in your project directory or specify a config file with --config",
            ),
            CodequalError::PermissionDenied { .. } => Some("Check file permissions"),
            CodequalError::OutputDirectoryNotFound { .. } => {
                Some("Create the output directory first or specify a different path")
            }
            _ => None,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        CodequalError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        CodequalError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        CodequalError::PermissionDenied { path: path.into() }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        CodequalError::Analysis {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CodequalError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for CodequalError {
    fn from(err: std::io::Error) -> Self {
        CodequalError::io_error(err)
    }
}

impl From<toml::de::Error> for CodequalError {
    fn from(err: toml::de::Error) -> Self {
        CodequalError::TomlParse { source: err }
    }
}

impl From<toml::ser::Error> for CodequalError {
    fn from(err: toml::ser::Error) -> Self {
        CodequalError::TomlSerialize { source: err }
    }
}

impl From<csv::Error> for CodequalError {
    fn from(err: csv::Error) -> Self {
        CodequalError::Csv { source: err }
    }
}

impl From<glob::PatternError> for CodequalError {
    fn from(err: glob::PatternError) -> Self {
        CodequalError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for CodequalError {
    fn from(err: serde_json::Error) -> Self {
        CodequalError::JsonSerialize { source: err }
    }
}

/// Result type alias for codequal operations
pub type Result<T> = std::result::Result<T, CodequalError>;
