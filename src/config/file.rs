//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource, CONFIG_FILE_NAME};
use crate::error::{CodequalError, Result};
use crate::models::config::PartialSettings;

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(CONFIG_FILE_NAME),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(CodequalError::ConfigNotFound {
                path: self.path.clone(),
            });
        }
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source.
///
/// Reads `<PREFIX>_<FIELD>` for the settings that make sense outside a config
/// file. List values are comma-separated.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

/// Variable suffixes understood by [`EnvConfig`]
const ENV_KEYS: &[&str] = &[
    "SCAN_PATH",
    "EXCLUDE",
    "EXCLUDED_DIRS",
    "MAX_DEPTH",
    "MIN_SEVERITY",
    "GOD_PACKAGE_THRESHOLD",
    "DEEP_PACKAGE_THRESHOLD",
    "ENTRY_POINT_SUFFIXES",
    "DEDUPE_CYCLES",
    "OUTPUT_FORMAT",
    "PARALLEL",
    "THREADS",
    "NO_COLOR",
];

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 15,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }

    /// Parse a variable, rejecting malformed values
    fn parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.var(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
                CodequalError::config_error(format!(
                    "Invalid value '{}' for {}_{}: {}",
                    raw, self.prefix, key, e
                ))
            }),
        }
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.var(key).map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            scan_path: self.var("SCAN_PATH").map(PathBuf::from),
            exclude_patterns: self.list("EXCLUDE"),
            excluded_dirs: self.list("EXCLUDED_DIRS"),
            entry_point_suffixes: self.list("ENTRY_POINT_SUFFIXES"),
            max_depth: self.parsed("MAX_DEPTH")?,
            min_severity: self.parsed("MIN_SEVERITY")?,
            god_package_threshold: self.parsed("GOD_PACKAGE_THRESHOLD")?,
            deep_package_threshold: self.parsed("DEEP_PACKAGE_THRESHOLD")?,
            dedupe_cycles: self.parsed("DEDUPE_CYCLES")?,
            output_format: self.parsed("OUTPUT_FORMAT")?,
            parallel: self.parsed("PARALLEL")?,
            threads: self.parsed("THREADS")?,
            ..Default::default()
        };

        if self.var("NO_COLOR").is_some() {
            settings.use_colors = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
