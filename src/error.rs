// Centralized error handling module
// Every fallible operation in the crate reports through CleanerError

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for fileremover
/// Carries the path and operation that failed so the top level can report it once
#[derive(Debug)]
pub enum CleanerError {
    /// File system errors with context
    FileNotFound { path: PathBuf },
    DirectoryNotFound { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Hash computation errors
    UnsupportedAlgorithm { algorithm: String },

    /// Pattern errors
    InvalidPattern { pattern: String, reason: String },

    /// Configuration file errors
    ConfigError { path: PathBuf, reason: String },
}

impl fmt::Display for CleanerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CleanerError::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            CleanerError::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
            CleanerError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied while {} {}\n", operation, path.display())?;
                write!(f, "Suggestion: Check permissions or run with appropriate privileges")
            }
            CleanerError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} {}: {}", operation, p.display(), source)
                } else {
                    write!(f, "I/O error while {}: {}", operation, source)
                }
            }
            CleanerError::UnsupportedAlgorithm { algorithm } => {
                write!(f, "Unsupported hash algorithm: {}\n", algorithm)?;
                write!(f, "Suggestion: Use --list-algorithms to see available algorithms")
            }
            CleanerError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern '{}': {}", pattern, reason)
            }
            CleanerError::ConfigError { path, reason } => {
                write!(f, "Failed to load configuration {}: {}\n", path.display(), reason)?;
                write!(f, "Suggestion: Check the TOML syntax and field names")
            }
        }
    }
}

impl std::error::Error for CleanerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CleanerError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl CleanerError {
    /// Create an error with context about the operation and optional path,
    /// mapping NotFound and PermissionDenied to their dedicated variants
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match (err.kind(), path) {
            (io::ErrorKind::NotFound, Some(p)) => {
                if operation.contains("directory") {
                    CleanerError::DirectoryNotFound { path: p }
                } else {
                    CleanerError::FileNotFound { path: p }
                }
            }
            (io::ErrorKind::PermissionDenied, Some(p)) => CleanerError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            (_, path) => CleanerError::IoError {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }
}

impl From<io::Error> for CleanerError {
    fn from(err: io::Error) -> Self {
        CleanerError::from_io_error(err, "performing I/O", None)
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, CleanerError>;
