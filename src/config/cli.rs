//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings, Settings};
use crate::models::issue::Severity;

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Setting-related command-line values, detached from clap
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub min_severity: Option<Severity>,
    pub god_package_threshold: Option<usize>,
    pub deep_package_threshold: Option<usize>,
    pub entry_point_suffixes: Vec<String>,
    pub dedupe_cycles: bool,
    pub max_complexity: Option<u32>,
    pub max_method_lines: Option<usize>,
    pub max_parameters: Option<usize>,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub no_colors: bool,
    pub no_progress: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            exclude: args.exclude.clone(),
            exclude_dirs: args.exclude_dir.clone(),
            max_depth: args.max_depth,
            follow_links: args.follow_links,
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            output_file: args.output_file.clone(),
            min_severity: args.min_severity,
            god_package_threshold: args.god_package_threshold,
            deep_package_threshold: args.deep_package_threshold,
            entry_point_suffixes: args.entry_point_suffix.clone(),
            dedupe_cycles: args.dedupe_cycles,
            max_complexity: args.max_complexity,
            max_method_lines: args.max_method_lines,
            max_parameters: args.max_parameters,
            no_parallel: args.no_parallel,
            threads: args.threads,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            quiet: args.quiet,
            verbose: args.verbose,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;

        // --exclude-dir adds to the built-in list rather than replacing it
        let excluded_dirs = if args.exclude_dirs.is_empty() {
            None
        } else {
            let mut dirs = Settings::default().excluded_dirs;
            for dir in &args.exclude_dirs {
                if !dirs.contains(dir) {
                    dirs.push(dir.clone());
                }
            }
            Some(dirs)
        };

        // Flags only override when present
        Ok(PartialSettings {
            scan_path: args.path.clone(),
            exclude_patterns: non_empty(&args.exclude),
            excluded_dirs,
            max_depth: args.max_depth,
            follow_links: args.follow_links.then_some(true),
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            min_severity: args.min_severity,
            god_package_threshold: args.god_package_threshold,
            deep_package_threshold: args.deep_package_threshold,
            entry_point_suffixes: non_empty(&args.entry_point_suffixes),
            dedupe_cycles: args.dedupe_cycles.then_some(true),
            max_method_complexity: args.max_complexity,
            max_method_lines: args.max_method_lines,
            max_parameters: args.max_parameters,
            parallel: args.no_parallel.then_some(false),
            threads: args.threads,
            use_colors: args.no_colors.then_some(false),
            show_progress: args.no_progress.then_some(false),
            quiet: args.quiet.then_some(true),
            verbose: args.verbose.then_some(true),
            ..Default::default()
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
