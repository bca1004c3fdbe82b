//! Typed error handling for inclint.
//!
//! The evaluation engine itself only fails on logical invariant violations.
//! Everything else in here belongs to the input layer (descriptor files,
//! include lists, ignore configuration) and aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for inclint operations.
#[derive(Error, Debug)]
pub enum InclintError {
    /// I/O error when reading/writing files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed JSON input (descriptor or include list)
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Ignore configuration errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// An ignore pattern which is not a valid regular expression
    #[error("Invalid ignore pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl InclintError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a parse error for a malformed input file.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a pattern error.
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if the analysis can continue after this error.
    ///
    /// Broken inputs, configuration or usage updates make every finding
    /// unreliable, so none of the current variants are.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io { .. }
            | Self::Parse { .. }
            | Self::Config { .. }
            | Self::Pattern { .. }
            | Self::InvalidArgument { .. }
            | Self::Internal { .. } => false,
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Parse { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for inclint results.
pub type InclintResult<T> = Result<T, InclintError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> InclintResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> InclintResult<T> {
        self.map_err(|e| InclintError::io(path, e))
    }
}
