//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::{format_issue_line, CSV_HEADER};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::config::{OutputFormat, Settings};
use crate::models::issue::Severity;

/// Trait for different output formatters
pub trait Formatter {
    /// Format analysis results into a string
    fn format(&self, results: &AnalysisResult) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub min_severity: Severity,
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(min_severity: Severity, use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            min_severity,
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, results: &AnalysisResult) -> Result<String> {
        if self.quiet {
            return Ok(formatters::format_results_quiet(results));
        }

        Ok(formatters::format_results_text(
            results,
            self.min_severity,
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, results: &AnalysisResult) -> Result<String> {
        formatters::format_results_json(results)
    }
}

/// CSV formatter, one row per issue
pub struct CsvFormatter {
    pub min_severity: Severity,
}

impl CsvFormatter {
    pub fn new(min_severity: Severity) -> Self {
        Self { min_severity }
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, results: &AnalysisResult) -> Result<String> {
        formatters::format_results_csv(results, self.min_severity)
    }
}

/// Create a formatter for the configured output format
pub fn create_formatter(settings: &Settings) -> Box<dyn Formatter> {
    match settings.output_format {
        OutputFormat::Text => Box::new(TextFormatter::new(
            settings.min_severity,
            settings.use_colors,
            settings.verbose,
            settings.quiet,
        )),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter::new(settings.min_severity)),
    }
}
