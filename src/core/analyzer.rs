//! Project analysis pipeline
//!
//! walk, then parse and extract every file (optionally in parallel), then merge
//! in path order into the symbol table, build the dependency graph, run the
//! project detectors and fold everything into metrics.

use crate::core::aggregator;
use crate::core::parallel::{self, CancellationToken};
use crate::core::walker::SourceWalker;
use crate::detectors::{self, check_file, DetectorConfig, FileRuleConfig};
use crate::error::{log_recovered, CodequalError, Result, ResultExt};
use crate::models::analysis::{AnalysisResult, FileSummary};
use crate::models::config::Settings;
use crate::models::issue::FileIssue;
use crate::models::source_file::{ParseStatus, SourceFile};
use crate::models::symbol_table::SymbolTable;
use crate::parsers::{
    extract_facts, DependencyGraphBuilder, GraphBuilderConfig, JavaParser, ParseOutcome,
    SourceParser,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Runs one analysis over a project root. All state lives in the run.
pub struct ProjectAnalyzer {
    settings: Settings,
    parser: Arc<dyn SourceParser>,
    cancel: CancellationToken,
}

/// A file after parsing, with the issues its own checks produced
struct ProcessedFile {
    source: SourceFile,
    issues: Vec<FileIssue>,
}

impl ProjectAnalyzer {
    /// Create an analyzer using the tree-sitter Java parser
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            parser: Arc::new(JavaParser),
            cancel: CancellationToken::new(),
        }
    }

    /// Substitute the parser adapter
    pub fn with_parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Share a cancellation token with the caller
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Analyze the configured project
    pub fn analyze(&self) -> Result<AnalysisResult> {
        self.analyze_with_progress(|_, _, _| {})
    }

    /// Analyze with progress reporting
    pub fn analyze_with_progress<F>(&self, progress_fn: F) -> Result<AnalysisResult>
    where
        F: Fn(usize, usize, &str) + Send + Sync,
    {
        let start_time = Instant::now();
        let root = self.settings.scan_path.clone();

        progress_fn(0, 0, &format!("Scanning directory: {}", root.display()));
        let walked = SourceWalker::from_settings(&self.settings)?.walk()?;
        for skipped in &walked.skipped {
            tracing::debug!("walk skipped: {}", skipped.user_message());
        }

        let total = walked.files.len();
        progress_fn(0, total, &format!("Found {} source files", total));

        let mut processed = self.process_files(&root, &walked.files, &progress_fn)?;
        processed.sort_by(|a, b| a.source.path.cmp(&b.source.path));

        let mut symbols = SymbolTable::new();
        for file in &processed {
            for info in file.source.declared_types() {
                symbols.insert(info.clone());
            }
        }

        let graph = DependencyGraphBuilder::new(&symbols, GraphBuilderConfig::default())
            .build(processed.iter().map(|p| &p.source));

        progress_fn(total, total, "Running project detectors");
        let project_issues =
            detectors::run_project_detectors(&symbols, &graph, &DetectorConfig::from(&self.settings));

        let files: Vec<FileSummary> = processed.into_iter().map(summarize).collect();
        let metrics = aggregator::aggregate(&files, &project_issues, symbols.package_count());

        tracing::info!(
            files = metrics.total_files,
            parsed = metrics.successfully_parsed,
            failures = metrics.parse_failures,
            types = symbols.len(),
            issues = metrics.issue_counts.total(),
            score = metrics.score,
            "analysis finished"
        );
        progress_fn(total, total, "Analysis complete");

        Ok(AnalysisResult {
            project_root: root,
            files,
            project_issues,
            metrics,
            graph_statistics: graph.statistics(),
            duplicate_types: symbols.duplicates().to_vec(),
            analysis_date: chrono::Utc::now(),
            scan_duration: start_time.elapsed(),
            dependency_graph: graph,
        })
    }

    fn process_files<F>(
        &self,
        root: &Path,
        files: &[PathBuf],
        progress_fn: &F,
    ) -> Result<Vec<ProcessedFile>>
    where
        F: Fn(usize, usize, &str) + Send + Sync,
    {
        let rules = FileRuleConfig::from(&self.settings);
        let work = |relative: &PathBuf| -> Result<ProcessedFile> {
            self.cancel.check()?;
            Ok(self.process_file(root, relative, &rules))
        };
        let report = |update: parallel::ProgressUpdate| {
            progress_fn(update.current, update.total, &update.message)
        };

        if !self.settings.parallel {
            return parallel::process_with_progress(files, false, work, report);
        }

        match self.settings.threads {
            Some(threads) => {
                let pool = parallel::build_thread_pool(Some(threads))?;
                pool.install(|| parallel::process_with_progress(files, true, work, report))
            }
            None => parallel::process_with_progress(files, true, work, report),
        }
    }

    fn process_file(&self, root: &Path, relative: &Path, rules: &FileRuleConfig) -> ProcessedFile {
        tracing::debug!(path = %relative.display(), "analyzing");

        let text = match read_source(&root.join(relative)) {
            Ok(text) => text,
            Err(err) => {
                log_recovered(&err);
                return ProcessedFile {
                    source: SourceFile {
                        path: relative.to_path_buf(),
                        text: String::new(),
                        status: ParseStatus::Failure {
                            reason: err.to_string(),
                        },
                        facts: None,
                    },
                    issues: Vec::new(),
                };
            }
        };

        match self.parser.parse(&text) {
            ParseOutcome::Success(tree) => {
                let facts = extract_facts(&tree, relative);
                let issues = check_file(&facts, rules);
                ProcessedFile {
                    source: SourceFile {
                        path: relative.to_path_buf(),
                        text,
                        status: ParseStatus::Success,
                        facts: Some(facts),
                    },
                    issues,
                }
            }
            ParseOutcome::Failure { reason } => {
                tracing::warn!(path = %relative.display(), %reason, "parse failed");
                ProcessedFile {
                    source: SourceFile {
                        path: relative.to_path_buf(),
                        text,
                        status: ParseStatus::Failure { reason },
                        facts: None,
                    },
                    issues: Vec::new(),
                }
            }
        }
    }
}

/// Read a file as UTF-8
fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_source_file(path)?;
    String::from_utf8(bytes).map_err(|e| CodequalError::IoRead {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })
}

fn summarize(file: ProcessedFile) -> FileSummary {
    let ProcessedFile { source, issues } = file;
    let failure_reason = match &source.status {
        ParseStatus::Success => None,
        ParseStatus::Failure { reason } => Some(reason.clone()),
    };

    match source.facts {
        Some(facts) => FileSummary {
            path: source.path,
            parsed: true,
            failure_reason,
            package: Some(facts.package.clone()),
            class_count: facts.class_count(),
            method_count: facts.method_count(),
            total_complexity: facts.total_complexity(),
            issues,
        },
        None => FileSummary {
            path: source.path,
            parsed: false,
            failure_reason,
            package: None,
            class_count: 0,
            method_count: 0,
            total_complexity: 0,
            issues: Vec::new(),
        },
    }
}
