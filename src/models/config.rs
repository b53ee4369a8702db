//! Configuration-related data structures

use crate::models::issue::Severity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for codequal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Project root to analyze
    pub scan_path: PathBuf,

    /// Directory names skipped anywhere in the tree
    pub excluded_dirs: Vec<String>,

    /// Directory names marking test sources, skipped when they appear below the root
    pub test_dir_names: Vec<String>,

    /// Glob patterns for additional paths to skip
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Issues below this severity are dropped from the report
    pub min_severity: Severity,

    /// A package with more types than this is reported as a god package
    pub god_package_threshold: usize,

    /// A package with more dot-separated segments than this is reported as too deep
    pub deep_package_threshold: usize,

    /// Public types whose name ends with one of these are never reported as unused
    pub entry_point_suffixes: Vec<String>,

    /// Report each cycle once, regardless of which member it was entered from
    pub dedupe_cycles: bool,

    /// Per-method complexity limit
    pub max_method_complexity: u32,

    /// Per-method line limit
    pub max_method_lines: usize,

    /// Per-method parameter limit
    pub max_parameters: usize,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to parse files in parallel
    pub parallel: bool,

    /// Worker thread count; defaults to the number of CPUs
    pub threads: Option<usize>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            excluded_dirs: [
                "build",
                "target",
                "node_modules",
                "out",
                "bin",
                ".git",
                ".idea",
                ".gradle",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            test_dir_names: vec!["test".to_string(), "tests".to_string()],
            exclude_patterns: Vec::new(),
            max_depth: None,
            follow_links: false,
            min_severity: Severity::Info,
            god_package_threshold: 15,
            deep_package_threshold: 6,
            entry_point_suffixes: vec![
                "Application".to_string(),
                "Main".to_string(),
                "Test".to_string(),
            ],
            dedupe_cycles: false,
            max_method_complexity: 10,
            max_method_lines: 50,
            max_parameters: 5,
            output_format: OutputFormat::Text,
            output_file: None,
            parallel: true,
            threads: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub excluded_dirs: Option<Vec<String>>,
    pub test_dir_names: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: Option<bool>,
    pub min_severity: Option<Severity>,
    pub god_package_threshold: Option<usize>,
    pub deep_package_threshold: Option<usize>,
    pub entry_point_suffixes: Option<Vec<String>>,
    pub dedupe_cycles: Option<bool>,
    pub max_method_complexity: Option<u32>,
    pub max_method_lines: Option<usize>,
    pub max_parameters: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

macro_rules! take_some {
    ($self:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $self.$field = $other.$field;
            }
        )+
    };
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        take_some!(
            self,
            other,
            scan_path,
            excluded_dirs,
            test_dir_names,
            exclude_patterns,
            max_depth,
            follow_links,
            min_severity,
            god_package_threshold,
            deep_package_threshold,
            entry_point_suffixes,
            dedupe_cycles,
            max_method_complexity,
            max_method_lines,
            max_parameters,
            output_format,
            output_file,
            parallel,
            threads,
            quiet,
            verbose,
            use_colors,
            show_progress,
        );
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(scan_path) = &self.scan_path {
            settings.scan_path = scan_path.clone();
        }
        if let Some(excluded_dirs) = &self.excluded_dirs {
            settings.excluded_dirs = excluded_dirs.clone();
        }
        if let Some(test_dir_names) = &self.test_dir_names {
            settings.test_dir_names = test_dir_names.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(min_severity) = self.min_severity {
            settings.min_severity = min_severity;
        }
        if let Some(threshold) = self.god_package_threshold {
            settings.god_package_threshold = threshold;
        }
        if let Some(threshold) = self.deep_package_threshold {
            settings.deep_package_threshold = threshold;
        }
        if let Some(suffixes) = &self.entry_point_suffixes {
            settings.entry_point_suffixes = suffixes.clone();
        }
        if let Some(dedupe_cycles) = self.dedupe_cycles {
            settings.dedupe_cycles = dedupe_cycles;
        }
        if let Some(limit) = self.max_method_complexity {
            settings.max_method_complexity = limit;
        }
        if let Some(limit) = self.max_method_lines {
            settings.max_method_lines = limit;
        }
        if let Some(limit) = self.max_parameters {
            settings.max_parameters = limit;
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let settings = Settings::default();
        assert_eq!(settings.god_package_threshold, 15);
        assert_eq!(settings.deep_package_threshold, 6);
        assert_eq!(settings.max_method_complexity, 10);
        assert_eq!(settings.max_method_lines, 50);
        assert_eq!(settings.max_parameters, 5);
        assert!(settings.excluded_dirs.contains(&"target".to_string()));
        assert!(!settings.dedupe_cycles);
    }

    #[test]
    fn test_merge_prefers_later_values() {
        let mut base = PartialSettings {
            god_package_threshold: Some(20),
            quiet: Some(false),
            ..Default::default()
        };
        base.merge_from(PartialSettings {
            quiet: Some(true),
            ..Default::default()
        });

        let settings = base.to_settings();
        assert_eq!(settings.god_package_threshold, 20);
        assert!(settings.quiet);
    }
}
