//! Settings validation

use crate::core::walker::compile_patterns;
use crate::error::{CodequalError, Result};
use crate::models::config::Settings;
use std::path::Path;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return the first problem found
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.exists() {
            return Err(CodequalError::InvalidPath {
                path: settings.scan_path.clone(),
            });
        }

        compile_patterns(&settings.exclude_patterns)?;

        let thresholds = [
            ("god_package_threshold", settings.god_package_threshold),
            ("deep_package_threshold", settings.deep_package_threshold),
            ("max_method_complexity", settings.max_method_complexity as usize),
            ("max_method_lines", settings.max_method_lines),
            ("max_parameters", settings.max_parameters),
        ];
        for (name, value) in thresholds {
            if value == 0 {
                return Err(CodequalError::config_error(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        if settings.max_depth == Some(0) {
            return Err(CodequalError::config_error("Max depth must be at least 1"));
        }

        if settings.threads == Some(0) {
            return Err(CodequalError::config_error("Thread count must be at least 1"));
        }

        if settings.entry_point_suffixes.iter().any(|s| s.is_empty()) {
            return Err(CodequalError::config_error(
                "Entry-point suffixes must not be empty",
            ));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// The output file's directory must already exist
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(CodequalError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
