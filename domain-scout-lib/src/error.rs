//! Error handling for domain screening operations.
//!
//! The checker itself never surfaces these to callers (every check degrades
//! to an undetermined result instead); they exist for the layers that can
//! legitimately fail, namely the whois subprocess boundary, config loading,
//! and file input.

use std::fmt;

/// Main error type for the library.
#[derive(Debug, Clone)]
pub enum DomainScoutError {
    /// Whois subprocess failures (spawn error, non-zero exit)
    WhoisError { domain: String, message: String },

    /// An operation exceeded its wall-clock bound
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Configuration errors (invalid settings, bad config file values)
    ConfigError { message: String },

    /// File I/O errors when reading config or domain lists
    FileError { path: String, message: String },
}

impl DomainScoutError {
    /// Create a new whois error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainScoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WhoisError { domain, message } => {
                write!(f, "whois error for '{}': {}", domain, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for DomainScoutError {}
