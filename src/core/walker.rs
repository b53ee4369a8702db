//! Source-tree walking
//!
//! Enumerates `.java` files under a project root, pruning hidden, build-output
//! and test directories. Errors on individual entries are recorded and skipped;
//! only a bad root is fatal.

use crate::error::{log_recovered, CodequalError, Result};
use crate::models::config::Settings;
use glob::Pattern;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File extension of analyzed sources
pub const SOURCE_EXTENSION: &str = "java";

/// Files found under the root plus the entries that had to be skipped
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Root-relative paths, sorted
    pub files: Vec<PathBuf>,
    pub skipped: Vec<CodequalError>,
}

/// Walker for source directories
#[derive(Debug, Clone)]
pub struct SourceWalker {
    root: PathBuf,
    excluded_dirs: BTreeSet<String>,
    test_dir_names: BTreeSet<String>,
    exclude_patterns: Vec<Pattern>,
    max_depth: Option<usize>,
    follow_links: bool,
}

impl SourceWalker {
    /// Create a walker with default exclusions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = Settings::default();
        Self {
            root: root.into(),
            excluded_dirs: defaults.excluded_dirs.into_iter().collect(),
            test_dir_names: defaults.test_dir_names.into_iter().collect(),
            exclude_patterns: Vec::new(),
            max_depth: None,
            follow_links: false,
        }
    }

    /// Create a walker from settings, compiling the exclude globs
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            root: settings.scan_path.clone(),
            excluded_dirs: settings.excluded_dirs.iter().cloned().collect(),
            test_dir_names: settings.test_dir_names.iter().cloned().collect(),
            exclude_patterns: compile_patterns(&settings.exclude_patterns)?,
            max_depth: settings.max_depth,
            follow_links: settings.follow_links,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree
    pub fn walk(&self) -> Result<WalkOutcome> {
        self.check_root()?;

        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut outcome = WalkOutcome::default();

        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_pruned(entry));

        for item in entries {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    let skipped = walk_error(&self.root, err);
                    log_recovered(&skipped);
                    outcome.skipped.push(skipped);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !has_source_extension(entry.path()) {
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };

            if self.in_test_dir(&relative) || self.matches_pattern(&relative) {
                tracing::trace!(path = %relative.display(), "excluded");
                continue;
            }

            outcome.files.push(relative);
        }

        outcome.files.sort();
        tracing::debug!(
            files = outcome.files.len(),
            skipped = outcome.skipped.len(),
            root = %self.root.display(),
            "walk finished"
        );
        Ok(outcome)
    }

    fn check_root(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(CodequalError::InvalidPath {
                path: self.root.clone(),
            });
        }
        fs::read_dir(&self.root).map_err(|source| CodequalError::RootUnreadable {
            path: self.root.clone(),
            source,
        })?;
        Ok(())
    }

    /// Directories that are never descended into
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || self.excluded_dirs.contains(name.as_ref()) {
            return true;
        }
        if self.test_dir_names.contains(name.as_ref()) {
            return true;
        }
        match entry.path().strip_prefix(&self.root) {
            Ok(rel) => self.matches_pattern(rel),
            Err(_) => false,
        }
    }

    fn in_test_dir(&self, relative: &Path) -> bool {
        relative.parent().into_iter().flat_map(Path::components).any(|c| match c {
            Component::Normal(segment) => self
                .test_dir_names
                .contains(segment.to_string_lossy().as_ref()),
            _ => false,
        })
    }

    fn matches_pattern(&self, relative: &Path) -> bool {
        if self.exclude_patterns.is_empty() {
            return false;
        }
        let normalized = relative.to_string_lossy().replace('\\', "/");
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&normalized))
    }
}

/// Compile exclude patterns into glob patterns
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(CodequalError::from))
        .collect()
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == SOURCE_EXTENSION)
        .unwrap_or(false)
}

fn walk_error(root: &Path, err: walkdir::Error) -> CodequalError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.io_error().map(|io| io.kind()) {
        Some(std::io::ErrorKind::PermissionDenied) => CodequalError::PermissionDenied { path },
        _ => CodequalError::DirectoryTraversal {
            path,
            message: err.to_string(),
        },
    }
}
