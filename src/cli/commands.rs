//! Command implementations

use super::Args;
use crate::config::{self, CliArgs, FileConfig, CONFIG_FILE_NAME};
use crate::core::ProjectAnalyzer;
use crate::error::{CodequalError, ErrorSeverity, Result};
use crate::models::analysis::AnalysisResult;
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};
use crate::parsers::JavaParser;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// The run finished and nothing gated it
pub const EXIT_OK: i32 = 0;
/// The run failed
pub const EXIT_ERROR: i32 = 1;
/// The run failed with a critical error, or reported critical issues
pub const EXIT_CRITICAL: i32 = 2;
/// The quality score is below `--fail-under`
pub const EXIT_SCORE_BELOW_THRESHOLD: i32 = 3;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze the project selected by the arguments
    Analyze(Args),
    /// Write a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Analyze(args)
    }

    /// Execute the command, returning the process exit code
    pub fn execute(&self) -> Result<i32> {
        match self {
            Command::Analyze(args) => analyze(args),
            Command::Init => init(Path::new(CONFIG_FILE_NAME)),
        }
    }

    /// Run the command and turn errors into an exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(code) => code,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                if let Some(suggestion) = err.suggestion() {
                    eprintln!("Suggestion: {}", suggestion);
                }
                match err.severity() {
                    ErrorSeverity::Critical => EXIT_CRITICAL,
                    ErrorSeverity::Warning | ErrorSeverity::Error => EXIT_ERROR,
                }
            }
        }
    }
}

fn analyze(args: &Args) -> Result<i32> {
    let settings = config::load_config(&CliArgs::from(args))?;
    tracing::debug!(?settings, "resolved settings");

    let reporter = Arc::new(ProgressReporter::new(
        settings.quiet || !settings.show_progress,
        settings.verbose,
    ));
    reporter.start(0, &format!("Scanning {}", settings.scan_path.display()));

    let analyzer = ProjectAnalyzer::new(settings.clone()).with_parser(Arc::new(JavaParser::new()?));
    let outcome = analyzer.analyze_with_progress(create_progress_callback(reporter.clone()));
    reporter.finish("Analysis complete");
    let result = outcome?;

    let report = create_formatter(&settings).format(&result)?;
    create_writer(settings.output_file.as_ref()).write(&report)?;

    if let Some(path) = &settings.output_file {
        if !settings.quiet {
            eprintln!("Report written to {}", path.display());
        }
    }

    if let Some(dot_path) = &args.dot {
        write_dot(&result, dot_path)?;
        if !settings.quiet {
            eprintln!("Dependency graph written to {}", dot_path.display());
        }
    }

    for duplicate in &result.duplicate_types {
        reporter.print_warning(&format!(
            "type {} is declared in both {} and {}",
            duplicate.fqn,
            duplicate.replaced_file.display(),
            duplicate.winning_file.display()
        ));
    }

    Ok(exit_code_for(&result, args.fail_under))
}

/// Exit code for a finished run
pub fn exit_code_for(result: &AnalysisResult, fail_under: Option<u32>) -> i32 {
    if result.has_critical_issues() {
        return EXIT_CRITICAL;
    }
    match fail_under {
        Some(threshold) if result.metrics.score < threshold => EXIT_SCORE_BELOW_THRESHOLD,
        _ => EXIT_OK,
    }
}

/// Write the project's type graph as DOT; external targets are drawn dashed
pub fn write_dot(result: &AnalysisResult, path: &Path) -> Result<()> {
    let graph = &result.dependency_graph;
    let dot = graph.to_dot(|fqn| graph.dependencies.contains_key(fqn));
    fs::write(path, dot).map_err(|source| CodequalError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn init(config_path: &Path) -> Result<i32> {
    if config_path.exists() {
        println!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(EXIT_OK);
    }

    FileConfig::with_path(config_path).create_default()?;

    println!(
        "Created default configuration file at: {}",
        config_path.display()
    );
    println!("Every setting is commented out; uncomment a line to override its default.");
    Ok(EXIT_OK)
}
