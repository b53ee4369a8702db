//! Attaching paths to I/O failures and logging errors a run recovers from

use crate::error::{CodequalError, ErrorSeverity, Result};
use std::io;
use std::path::Path;

/// Extension trait for I/O results produced while reading project files
pub trait ResultExt<T> {
    /// Tag a failed read with the file it was reading
    fn with_source_file<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T> ResultExt<T> for io::Result<T> {
    fn with_source_file<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|source| {
            let path = path.as_ref().to_path_buf();
            match source.kind() {
                io::ErrorKind::PermissionDenied => CodequalError::PermissionDenied { path },
                _ => CodequalError::IoRead { path, source },
            }
        })
    }
}

/// Log an error the run continues past, at the level its severity calls for
pub fn log_recovered(err: &CodequalError) {
    let message = err.user_message();
    match err.severity() {
        ErrorSeverity::Warning => tracing::warn!("{}", message),
        ErrorSeverity::Error => tracing::error!("{}", message),
        ErrorSeverity::Critical => tracing::error!("critical: {}", message),
    }
}
