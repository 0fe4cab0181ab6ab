//! Unified error types for mixorder
//!
//! Error strategy:
//! - Musical data problems (missing tempo, missing key, out-of-range pitch
//!   class) are not errors. They degrade to "unknown" values.
//! - Configuration problems (bucket size, thread pool): rejected before sorting.
//! - Input/output problems: fatal for the run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for mixorder operations
#[derive(Debug, Error)]
pub enum MixorderError {
    // =========================================================================
    // Configuration errors - rejected before any sorting happens
    // =========================================================================
    #[error("Invalid bucket size: {0}\n  Tip: The BPM bucket size must be a positive number, e.g. --bucket-size 5")]
    InvalidBucketSize(f64),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    // =========================================================================
    // Input errors
    // =========================================================================
    #[error("Playlist file not found: '{0}'\n  Tip: Check the path exists and is accessible")]
    InputNotFound(PathBuf),

    #[error("Failed to read playlist '{path}': {reason}\n  Tip: Expected a JSON array of tracks or an object with a \"tracks\" array")]
    InputParseError { path: PathBuf, reason: String },

    // =========================================================================
    // Output errors
    // =========================================================================
    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for mixorder operations
pub type Result<T> = std::result::Result<T, MixorderError>;

impl MixorderError {
    /// Returns true if this error was caused by invalid settings rather than I/O
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MixorderError::InvalidBucketSize(_) | MixorderError::ConfigError(_)
        )
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!(
                    "Directory does not exist: {}",
                    path.parent().map(|p| p.display().to_string()).unwrap_or_default()
                )
            }
            std::io::ErrorKind::AlreadyExists => {
                format!("File already exists: {} (use --force to overwrite)", path.display())
            }
            _ => err.to_string(),
        };
        MixorderError::OutputError { path, reason }
    }
}

/// Extension trait for attaching the playlist path to parse failures
pub trait InputContext<T> {
    fn with_input_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T, E: std::fmt::Display> InputContext<T> for std::result::Result<T, E> {
    fn with_input_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| MixorderError::InputParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
