//! Data models and structures for codequal

pub mod analysis;
pub mod config;
pub mod dependency_graph;
pub mod issue;
pub mod source_file;
pub mod symbol_table;

pub use analysis::{AnalysisResult, FileSummary, IssueRef, ProjectMetrics, ScoreBand};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use dependency_graph::{DependencyEdge, DependencyGraph, GraphStatistics};
pub use issue::{FileIssue, IssueCode, ProjectIssue, Severity, SeverityCounts};
pub use source_file::{
    FileFacts, ImportRef, MethodFacts, ParseStatus, SourceFile, TypeInfo, TypeKind, Visibility,
    DEFAULT_PACKAGE,
};
pub use symbol_table::{DuplicateType, SymbolTable};
