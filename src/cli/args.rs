//! Command-line argument parsing

use crate::models::issue::Severity;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// codequal - project-wide static analysis for Java source trees
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "codequal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze a Java source tree for structural and per-method quality issues")]
#[command(long_about = "codequal parses every .java file under a project root, builds a \
type-level dependency graph and reports unused public types, circular dependencies, \
oversized or overly deep packages and per-method problems, along with a 0-100 quality score.")]
#[command(after_help = "EXAMPLES:

    # Analyze the current directory
    codequal

    # Analyze a specific project, only showing warnings and worse
    codequal --path ./my-service --min-severity warning

    # Skip generated sources
    codequal --exclude 'src/generated/**' --exclude-dir gen

    # Machine-readable output
    codequal --output json --output-file report.json
    codequal --output csv --output-file issues.csv

    # Export the type dependency graph for Graphviz
    codequal --dot deps.dot

    # Fail a CI build when the score drops below 70
    codequal --quiet --fail-under 70

    # Create a default .codequal.toml in the current directory
    codequal --init
")]
pub struct Args {
    /// Project root to analyze (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Glob patterns, relative to the root, for paths to skip (repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Additional directory names to skip anywhere in the tree (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude_dir: Vec<String>,

    /// Maximum directory depth to traverse
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links during directory traversal
    #[arg(long)]
    pub follow_links: bool,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// File to write the report to (stdout if not specified)
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Lowest severity shown in the report: info, warning, error or critical
    #[arg(long, value_name = "LEVEL")]
    pub min_severity: Option<Severity>,

    /// Report packages holding more types than this
    #[arg(long, value_name = "N")]
    pub god_package_threshold: Option<usize>,

    /// Report packages with more name segments than this
    #[arg(long, value_name = "N")]
    pub deep_package_threshold: Option<usize>,

    /// Type-name suffix marking an entry point that is never reported unused (repeatable)
    #[arg(long, value_name = "SUFFIX")]
    pub entry_point_suffix: Vec<String>,

    /// Report each dependency cycle once instead of once per entry point
    #[arg(long)]
    pub dedupe_cycles: bool,

    /// Per-method cyclomatic complexity limit
    #[arg(long, value_name = "N")]
    pub max_complexity: Option<u32>,

    /// Per-method line limit
    #[arg(long, value_name = "N")]
    pub max_method_lines: Option<usize>,

    /// Per-method parameter limit
    #[arg(long, value_name = "N")]
    pub max_parameters: Option<usize>,

    /// Disable parallel parsing
    #[arg(long)]
    pub no_parallel: bool,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Only print a one-line summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Show suggestions, parse failures and graph statistics; enables debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a configuration file (defaults to .codequal.toml lookup)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Create a default configuration file (.codequal.toml) in the current directory
    #[arg(long)]
    pub init: bool,

    /// Exit with status 3 when the quality score is below this value
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub fail_under: Option<u32>,

    /// Write the type dependency graph in DOT format to this file
    #[arg(long, value_name = "FILE")]
    pub dot: Option<PathBuf>,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output, one row per issue
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_repeatable_and_typed_flags() {
        let args = Args::try_parse_from([
            "codequal",
            "--path",
            "/src",
            "--exclude",
            "gen/**",
            "--exclude",
            "legacy/**",
            "--entry-point-suffix",
            "Launcher",
            "--min-severity",
            "warning",
            "--output",
            "json",
            "--fail-under",
            "70",
        ])
        .unwrap();

        assert_eq!(args.path, Some(PathBuf::from("/src")));
        assert_eq!(args.exclude, vec!["gen/**", "legacy/**"]);
        assert_eq!(args.entry_point_suffix, vec!["Launcher"]);
        assert_eq!(args.min_severity, Some(Severity::Warning));
        assert_eq!(args.output, Some(OutputFormat::Json));
        assert_eq!(args.fail_under, Some(70));
    }

    #[test]
    fn test_rejects_out_of_range_fail_under() {
        assert!(Args::try_parse_from(["codequal", "--fail-under", "101"]).is_err());
        assert!(Args::try_parse_from(["codequal", "--min-severity", "loud"]).is_err());
    }
}
