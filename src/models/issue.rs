//! Issue and severity types shared by file checks and project detectors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a reported issue, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities, least severe first
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

/// Per-severity issue tally.
///
/// `bump` is the single place severities are counted; both file-level and
/// project-level aggregation go through it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub critical: usize,
}

impl SeverityCounts {
    /// Increment the counter for `severity`
    pub fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Info => self.info += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
            Severity::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.info + self.warning + self.error + self.critical
    }
}

/// Machine-readable issue codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    // Project-level
    UnusedPublicClass,
    CircularDependency,
    GodPackage,
    DeepPackage,
    // File-level
    HighComplexity,
    LongMethod,
    TooManyParameters,
    EmptyCatchBlock,
    TypeNaming,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::UnusedPublicClass => "UNUSED_PUBLIC_CLASS",
            IssueCode::CircularDependency => "CIRCULAR_DEPENDENCY",
            IssueCode::GodPackage => "GOD_PACKAGE",
            IssueCode::DeepPackage => "DEEP_PACKAGE",
            IssueCode::HighComplexity => "HIGH_COMPLEXITY",
            IssueCode::LongMethod => "LONG_METHOD",
            IssueCode::TooManyParameters => "TOO_MANY_PARAMETERS",
            IssueCode::EmptyCatchBlock => "EMPTY_CATCH_BLOCK",
            IssueCode::TypeNaming => "TYPE_NAMING",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue found by a project-level detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub suggestion: String,
    /// File path, package name, or cycle-head type
    pub location: String,
}

impl ProjectIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        suggestion: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            suggestion: suggestion.into(),
            location: location.into(),
        }
    }
}

/// An issue found by a per-file check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub suggestion: String,
    /// 1-based line of the offending declaration
    pub line: usize,
}
