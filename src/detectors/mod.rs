//! Project-level and per-file quality detectors
//!
//! Project detectors are pure functions of the symbol table and dependency
//! graph; they run in a fixed order and each emits its issues in sorted key
//! order, so a run over unchanged input always yields the same sequence.

pub mod cycles;
pub mod file_rules;
pub mod packages;
pub mod unused;

use crate::models::config::Settings;
use crate::models::dependency_graph::DependencyGraph;
use crate::models::issue::ProjectIssue;
use crate::models::symbol_table::SymbolTable;

pub use cycles::CircularDependencyDetector;
pub use file_rules::{check_file, FileRuleConfig};
pub use packages::{DeepPackageDetector, GodPackageDetector};
pub use unused::UnusedPublicTypeDetector;

/// Thresholds and switches shared by the project detectors
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub god_package_threshold: usize,
    pub deep_package_threshold: usize,
    pub entry_point_suffixes: Vec<String>,
    pub dedupe_cycles: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig::from(&Settings::default())
    }
}

impl From<&Settings> for DetectorConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            god_package_threshold: settings.god_package_threshold,
            deep_package_threshold: settings.deep_package_threshold,
            entry_point_suffixes: settings.entry_point_suffixes.clone(),
            dedupe_cycles: settings.dedupe_cycles,
        }
    }
}

/// Read-only view of the project handed to each detector
#[derive(Debug, Clone, Copy)]
pub struct ProjectContext<'a> {
    pub symbols: &'a SymbolTable,
    pub graph: &'a DependencyGraph,
}

/// A whole-project check
pub trait ProjectDetector: Send + Sync {
    /// Stable identifier, used in logs
    fn name(&self) -> &'static str;

    fn detect(&self, ctx: &ProjectContext<'_>) -> Vec<ProjectIssue>;
}

/// The fixed detector battery, in reporting order
pub fn default_detectors(config: &DetectorConfig) -> Vec<Box<dyn ProjectDetector>> {
    vec![
        Box::new(UnusedPublicTypeDetector::new(
            config.entry_point_suffixes.clone(),
        )),
        Box::new(CircularDependencyDetector::new(config.dedupe_cycles)),
        Box::new(GodPackageDetector::new(config.god_package_threshold)),
        Box::new(DeepPackageDetector::new(config.deep_package_threshold)),
    ]
}

/// Run every project detector and concatenate their issues
pub fn run_project_detectors(
    symbols: &SymbolTable,
    graph: &DependencyGraph,
    config: &DetectorConfig,
) -> Vec<ProjectIssue> {
    let ctx = ProjectContext { symbols, graph };
    let mut issues = Vec::new();

    for detector in default_detectors(config) {
        let found = detector.detect(&ctx);
        tracing::debug!(detector = detector.name(), issues = found.len(), "detector finished");
        issues.extend(found);
    }

    issues
}
