//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CodequalError, Result};
use crate::models::config::PartialSettings;

/// Name of the per-project and per-user configuration file
pub const CONFIG_FILE_NAME: &str = ".codequal.toml";

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CodequalError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| CodequalError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings =
        toml::from_str(content).map_err(|e| CodequalError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn invalid(path: &Path, message: String) -> CodequalError {
    CodequalError::config_error(format!("{} (in {})", message, path.display()))
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(scan_path) = &settings.scan_path {
        if scan_path.as_os_str().is_empty() {
            return Err(invalid(path, "Invalid empty scan_path".to_string()));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(invalid(path, "Empty exclude pattern".to_string()));
            }
            glob::Pattern::new(pattern).map_err(|e| {
                invalid(path, format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }
    }

    if settings.max_depth == Some(0) {
        return Err(invalid(path, "max_depth must be at least 1".to_string()));
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid(path, "Invalid empty output_file".to_string()));
        }
    }

    Ok(())
}

/// Default config file locations, in lookup order: working directory, home
/// directory, then the platform config directory
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(CONFIG_FILE_NAME));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("codequal").join("config.toml"));
    }
    locations
}

/// Load the first config file that exists among `locations`
pub fn find_config_in(locations: &[PathBuf]) -> Result<Option<PartialSettings>> {
    for location in locations {
        if location.is_file() {
            tracing::debug!(path = %location.display(), "using config file");
            return parse_config_file(location).map(Some);
        }
    }
    Ok(None)
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    find_config_in(&default_config_locations())
}

/// The embedded default configuration
pub fn default_config_content() -> &'static str {
    DEFAULT_CONFIG
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(CodequalError::io_error)?;
        }
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| CodequalError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
