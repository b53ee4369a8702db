//! Analysis result structures

use super::dependency_graph::{DependencyGraph, GraphStatistics};
use super::issue::{FileIssue, ProjectIssue, Severity, SeverityCounts};
use super::symbol_table::DuplicateType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Per-file outcome kept in the final report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    /// Project-relative path
    pub path: PathBuf,
    pub parsed: bool,
    /// Why parsing or reading failed
    pub failure_reason: Option<String>,
    pub package: Option<String>,
    pub class_count: usize,
    pub method_count: usize,
    pub total_complexity: u64,
    pub issues: Vec<FileIssue>,
}

/// Project-wide counters and derived quality indicators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub total_files: usize,
    pub successfully_parsed: usize,
    pub parse_failures: usize,
    pub total_classes: usize,
    pub total_methods: usize,
    pub total_complexity: u64,
    pub total_packages: usize,
    pub issue_counts: SeverityCounts,
    pub avg_complexity_per_method: f64,
    pub avg_methods_per_class: f64,
    pub score: u32,
}

/// Coarse label for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Good,
    NeedsImprovement,
    SeriousProblems,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Good
        } else if score >= 60 {
            ScoreBand::NeedsImprovement
        } else {
            ScoreBand::SeriousProblems
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Good => "Good",
            ScoreBand::NeedsImprovement => "Needs improvement",
            ScoreBand::SeriousProblems => "Serious problems",
        }
    }
}

impl ProjectMetrics {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Complete outcome of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub project_root: PathBuf,
    /// Sorted by path
    pub files: Vec<FileSummary>,
    /// In detector order
    pub project_issues: Vec<ProjectIssue>,
    pub metrics: ProjectMetrics,
    pub graph_statistics: GraphStatistics,
    pub duplicate_types: Vec<DuplicateType>,
    pub analysis_date: chrono::DateTime<chrono::Utc>,
    pub scan_duration: Duration,
    #[serde(skip)]
    pub dependency_graph: DependencyGraph,
}

/// Issue view used by formatters, flattening file and project scope
#[derive(Debug, Clone, Copy)]
pub enum IssueRef<'a> {
    File {
        path: &'a PathBuf,
        issue: &'a FileIssue,
    },
    Project(&'a ProjectIssue),
}

impl<'a> IssueRef<'a> {
    pub fn severity(&self) -> Severity {
        match self {
            IssueRef::File { issue, .. } => issue.severity,
            IssueRef::Project(issue) => issue.severity,
        }
    }

    pub fn scope(&self) -> &'static str {
        match self {
            IssueRef::File { .. } => "file",
            IssueRef::Project(_) => "project",
        }
    }
}

impl AnalysisResult {
    /// File issues (in path order) followed by project issues, dropping those
    /// below `min_severity`
    pub fn issues_at_or_above(&self, min_severity: Severity) -> Vec<IssueRef<'_>> {
        let file_issues = self.files.iter().flat_map(|file| {
            file.issues.iter().map(move |issue| IssueRef::File {
                path: &file.path,
                issue,
            })
        });
        let project_issues = self.project_issues.iter().map(IssueRef::Project);

        file_issues
            .chain(project_issues)
            .filter(|issue| issue.severity() >= min_severity)
            .collect()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.iter().filter(|f| !f.parsed)
    }

    pub fn has_critical_issues(&self) -> bool {
        self.metrics.issue_counts.critical > 0
    }

    /// Format the scan duration as a human-readable string
    pub fn format_duration(&self) -> String {
        let secs = self.scan_duration.as_secs();
        let millis = self.scan_duration.subsec_millis();

        if secs == 0 {
            format!("{}ms", millis)
        } else if secs < 60 {
            format!("{}.{:03}s", secs, millis)
        } else {
            let mins = secs / 60;
            let secs = secs % 60;
            format!("{}m {}s", mins, secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::IssueCode;

    fn result_with_issues() -> AnalysisResult {
        AnalysisResult {
            project_root: PathBuf::from("/proj"),
            files: vec![FileSummary {
                path: PathBuf::from("a/A.java"),
                parsed: true,
                failure_reason: None,
                package: Some("a".into()),
                class_count: 1,
                method_count: 1,
                total_complexity: 12,
                issues: vec![FileIssue {
                    severity: Severity::Warning,
                    code: IssueCode::HighComplexity,
                    message: "too complex".into(),
                    suggestion: "split it".into(),
                    line: 3,
                }],
            }],
            project_issues: vec![ProjectIssue::new(
                Severity::Info,
                IssueCode::DeepPackage,
                "deep",
                "flatten",
                "a.b.c.d.e.f.g",
            )],
            metrics: ProjectMetrics::default(),
            graph_statistics: GraphStatistics::default(),
            duplicate_types: Vec::new(),
            analysis_date: chrono::Utc::now(),
            scan_duration: Duration::from_millis(1500),
            dependency_graph: DependencyGraph::default(),
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::NeedsImprovement);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::NeedsImprovement);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::SeriousProblems);
        assert_eq!(ScoreBand::SeriousProblems.label(), "Serious problems");
    }

    #[test]
    fn test_issue_filter_keeps_file_then_project_order() {
        let result = result_with_issues();

        let all = result.issues_at_or_above(Severity::Info);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].scope(), "file");
        assert_eq!(all[1].scope(), "project");

        let warnings = result.issues_at_or_above(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity(), Severity::Warning);
    }

    #[test]
    fn test_format_duration() {
        let result = result_with_issues();
        assert_eq!(result.format_duration(), "1.500s");
    }
}
