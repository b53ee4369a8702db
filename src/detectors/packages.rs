//! Package-shape checks: too many types, too deeply nested

use super::{ProjectContext, ProjectDetector};
use crate::models::issue::{IssueCode, ProjectIssue, Severity};

/// Flags packages holding more types than the threshold
pub struct GodPackageDetector {
    threshold: usize,
}

impl GodPackageDetector {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl ProjectDetector for GodPackageDetector {
    fn name(&self) -> &'static str {
        "god-package"
    }

    fn detect(&self, ctx: &ProjectContext<'_>) -> Vec<ProjectIssue> {
        ctx.symbols
            .by_package()
            .into_iter()
            .filter(|(_, types)| types.len() > self.threshold)
            .map(|(package, types)| {
                ProjectIssue::new(
                    Severity::Warning,
                    IssueCode::GodPackage,
                    format!(
                        "Package '{}' contains {} types (limit {})",
                        package,
                        types.len(),
                        self.threshold
                    ),
                    "Split the package by responsibility into smaller packages",
                    package,
                )
            })
            .collect()
    }
}

/// Flags packages nested deeper than the threshold
pub struct DeepPackageDetector {
    threshold: usize,
}

impl DeepPackageDetector {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

/// Number of dot-separated segments in a package name
pub fn package_depth(package: &str) -> usize {
    package.split('.').count()
}

impl ProjectDetector for DeepPackageDetector {
    fn name(&self) -> &'static str {
        "deep-package"
    }

    fn detect(&self, ctx: &ProjectContext<'_>) -> Vec<ProjectIssue> {
        ctx.symbols
            .by_package()
            .into_keys()
            .filter(|package| package_depth(package) > self.threshold)
            .map(|package| {
                ProjectIssue::new(
                    Severity::Info,
                    IssueCode::DeepPackage,
                    format!(
                        "Package '{}' is nested {} levels deep (limit {})",
                        package,
                        package_depth(package),
                        self.threshold
                    ),
                    "Flatten the package hierarchy",
                    package,
                )
            })
            .collect()
    }
}
