//! Metrics aggregation and scoring

use crate::models::analysis::{FileSummary, ProjectMetrics};
use crate::models::issue::{ProjectIssue, SeverityCounts};

const CRITICAL_PENALTY: i64 = 20;
const ERROR_PENALTY: i64 = 10;
const WARNING_PENALTY: i64 = 3;
const INFO_PENALTY: i64 = 1;

/// Quality score: 100 minus weighted issue counts, clamped to 0..=100
pub fn quality_score(counts: &SeverityCounts) -> u32 {
    let penalty = CRITICAL_PENALTY * counts.critical as i64
        + ERROR_PENALTY * counts.error as i64
        + WARNING_PENALTY * counts.warning as i64
        + INFO_PENALTY * counts.info as i64;
    (100 - penalty).clamp(0, 100) as u32
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

/// Fold file summaries (expected in path order) and project issues into metrics
pub fn aggregate(
    files: &[FileSummary],
    project_issues: &[ProjectIssue],
    total_packages: usize,
) -> ProjectMetrics {
    let mut metrics = ProjectMetrics {
        total_packages,
        ..Default::default()
    };

    for file in files {
        metrics.total_files += 1;
        if file.parsed {
            metrics.successfully_parsed += 1;
        } else {
            metrics.parse_failures += 1;
        }
        metrics.total_classes += file.class_count;
        metrics.total_methods += file.method_count;
        metrics.total_complexity += file.total_complexity;

        for issue in &file.issues {
            metrics.issue_counts.bump(issue.severity);
        }
    }

    for issue in project_issues {
        metrics.issue_counts.bump(issue.severity);
    }

    metrics.avg_complexity_per_method =
        ratio(metrics.total_complexity as f64, metrics.total_methods);
    metrics.avg_methods_per_class = ratio(metrics.total_methods as f64, metrics.total_classes);
    metrics.score = quality_score(&metrics.issue_counts);

    metrics
}
