//! Output formatting functionality
//!
//! This module provides the rendering functions behind the formatters.

use crate::error::{CodequalError, Result};
use crate::models::analysis::{AnalysisResult, IssueRef, ScoreBand};
use crate::models::issue::Severity;
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;

/// CSV header for issue rows
pub const CSV_HEADER: [&str; 6] = ["scope", "severity", "code", "location", "line", "message"];

fn paint_severity(severity: Severity, use_colors: bool) -> String {
    if !use_colors {
        return severity.as_str().to_string();
    }
    match severity {
        Severity::Info => Cyan.paint(severity.as_str()).to_string(),
        Severity::Warning => Yellow.paint(severity.as_str()).to_string(),
        Severity::Error => Red.paint(severity.as_str()).to_string(),
        Severity::Critical => Red.bold().paint(severity.as_str()).to_string(),
    }
}

fn paint_score(score: u32, band: ScoreBand, use_colors: bool) -> String {
    let text = format!("{}/100 ({})", score, band.label());
    if !use_colors {
        return text;
    }
    match band {
        ScoreBand::Good => Green.bold().paint(text).to_string(),
        ScoreBand::NeedsImprovement => Yellow.bold().paint(text).to_string(),
        ScoreBand::SeriousProblems => Red.bold().paint(text).to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        Blue.bold().paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Format a single issue as one text line
pub fn format_issue_line(issue: &IssueRef<'_>, use_colors: bool) -> String {
    match issue {
        IssueRef::File { path, issue } => format!(
            "  [{}] {} {}:{} {}\n",
            paint_severity(issue.severity, use_colors),
            issue.code,
            path.display(),
            issue.line,
            issue.message
        ),
        IssueRef::Project(issue) => format!(
            "  [{}] {} {} {}\n",
            paint_severity(issue.severity, use_colors),
            issue.code,
            issue.location,
            issue.message
        ),
    }
}

fn suggestion_of<'a>(issue: &IssueRef<'a>) -> &'a str {
    match issue {
        IssueRef::File { issue, .. } => &issue.suggestion,
        IssueRef::Project(issue) => &issue.suggestion,
    }
}

/// Format analysis results as text
pub fn format_results_text(
    results: &AnalysisResult,
    min_severity: Severity,
    use_colors: bool,
    verbose: bool,
) -> String {
    let mut output = String::new();
    let metrics = &results.metrics;

    output.push_str(&format!(
        "{}\n",
        heading("Code Quality Report", use_colors)
    ));
    if use_colors {
        output.push_str(&format!(
            "{}\n\n",
            Style::new()
                .dimmed()
                .paint(results.project_root.display().to_string())
        ));
    } else {
        output.push_str(&format!("{}\n\n", results.project_root.display()));
    }

    output.push_str(&format!("Files analyzed: {}\n", metrics.total_files));
    output.push_str(&format!("Successfully parsed: {}\n", metrics.successfully_parsed));
    output.push_str(&format!("Parse failures: {}\n", metrics.parse_failures));
    output.push_str(&format!("Packages: {}\n", metrics.total_packages));
    output.push_str(&format!("Classes: {}\n", metrics.total_classes));
    output.push_str(&format!("Methods: {}\n", metrics.total_methods));
    output.push_str(&format!("Total complexity: {}\n", metrics.total_complexity));
    output.push_str(&format!(
        "Average complexity per method: {:.2}\n",
        metrics.avg_complexity_per_method
    ));
    output.push_str(&format!(
        "Average methods per class: {:.2}\n",
        metrics.avg_methods_per_class
    ));
    output.push_str(&format!("Scan duration: {}\n", results.format_duration()));

    let counts = &metrics.issue_counts;
    output.push_str(&format!(
        "\nIssues: {} critical, {} error, {} warning, {} info\n",
        counts.critical, counts.error, counts.warning, counts.info
    ));

    let issues = results.issues_at_or_above(min_severity);
    if issues.is_empty() {
        output.push_str(&format!("No issues at or above {}\n", min_severity));
    } else {
        output.push_str(&format!(
            "\n{}\n",
            heading(&format!("Issues (>= {})", min_severity), use_colors)
        ));
        for issue in &issues {
            output.push_str(&format_issue_line(issue, use_colors));
            if verbose {
                output.push_str(&format!("      -> {}\n", suggestion_of(issue)));
            }
        }
    }

    if verbose {
        let failed: Vec<_> = results.failed_files().collect();
        if !failed.is_empty() {
            output.push_str(&format!("\n{}\n", heading("Parse Failures", use_colors)));
            for file in failed {
                output.push_str(&format!(
                    "  {}: {}\n",
                    file.path.display(),
                    file.failure_reason.as_deref().unwrap_or("unknown")
                ));
            }
        }

        let stats = &results.graph_statistics;
        output.push_str(&format!("\n{}\n", heading("Dependency Graph", use_colors)));
        output.push_str(&format!("  Nodes: {}\n", stats.total_nodes));
        output.push_str(&format!("  Edges: {}\n", stats.total_edges));
        output.push_str(&format!("  Self-references: {}\n", stats.self_loops));
        if let Some(name) = &stats.max_fan_in_type {
            output.push_str(&format!("  Most used: {} ({})\n", name, stats.max_fan_in));
        }
        if let Some(name) = &stats.max_fan_out_type {
            output.push_str(&format!(
                "  Most dependencies: {} ({})\n",
                name, stats.max_fan_out
            ));
        }

        if !results.duplicate_types.is_empty() {
            output.push_str(&format!("\n{}\n", heading("Duplicate Types", use_colors)));
            for dup in &results.duplicate_types {
                output.push_str(&format!(
                    "  {}: {} replaced by {}\n",
                    dup.fqn,
                    dup.replaced_file.display(),
                    dup.winning_file.display()
                ));
            }
        }
    }

    output.push_str(&format!(
        "\nQuality score: {}\n",
        paint_score(metrics.score, metrics.score_band(), use_colors)
    ));

    output
}

/// One-line summary used in quiet mode
pub fn format_results_quiet(results: &AnalysisResult) -> String {
    let metrics = &results.metrics;
    format!(
        "Score: {}/100 ({}), files: {}, parse failures: {}, issues: {}\n",
        metrics.score,
        metrics.score_band().label(),
        metrics.total_files,
        metrics.parse_failures,
        metrics.issue_counts.total()
    )
}

/// Format analysis results as JSON
pub fn format_results_json(results: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(results).map_err(|e| CodequalError::JsonSerialize { source: e })
}

/// Format issues at or above `min_severity` as CSV
pub fn format_results_csv(results: &AnalysisResult, min_severity: Severity) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;

    for issue in results.issues_at_or_above(min_severity) {
        match issue {
            IssueRef::File { path, issue } => writer.write_record([
                "file",
                issue.severity.as_str(),
                issue.code.as_str(),
                &path.display().to_string(),
                &issue.line.to_string(),
                &issue.message,
            ])?,
            IssueRef::Project(issue) => writer.write_record([
                "project",
                issue.severity.as_str(),
                issue.code.as_str(),
                &issue.location,
                "",
                &issue.message,
            ])?,
        }
    }

    let bytes = writer.into_inner().map_err(|e| CodequalError::Io {
        source: e.into_error(),
    })?;
    String::from_utf8(bytes).map_err(|e| CodequalError::CsvSerialize { source: e })
}
