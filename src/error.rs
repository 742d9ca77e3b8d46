//! Error types for book-extractor
//!
//! This module provides the error taxonomy for the pipeline:
//! - Fetch errors (non-success HTTP status, transport failure, timeout)
//! - Parse errors for unexpected response bodies
//! - Report errors when the output file cannot be written
//! - Configuration errors with the offending settings key
//!
//! Every error also maps to a process exit code and a machine-readable error
//! code through [`ToExitCode`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for book-extractor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for book-extractor
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The settings key that caused the error (e.g., "ApiSettings.ApiUrl")
        key: Option<String>,
    },

    /// Fetching the book list failed
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// The response body was not the expected JSON shape
    #[error("Failed to deserialize JSON response: {message}")]
    Parse {
        /// The underlying parser message
        message: String,
    },

    /// The report file could not be written
    #[error("failed to write report to {path}: {source}")]
    Report {
        /// Path of the report file
        path: PathBuf,
        /// The underlying I/O failure
        source: std::io::Error,
    },
}

/// Errors raised while fetching books from the remote API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-success status
    #[error("Failed to fetch books. Status code: {code} - {reason}")]
    Status {
        /// Numeric HTTP status code
        code: u16,
        /// Canonical status text (e.g., "Internal Server Error")
        reason: String,
    },

    /// The request never produced a usable response
    #[error("Failed to fetch books from '{url}': {message}")]
    Transport {
        /// The URL that was requested
        url: String,
        /// Description of the transport failure
        message: String,
    },

    /// The request exceeded the configured timeout
    #[error("Timeout fetching books from '{url}' (exceeded {secs} seconds)")]
    Timeout {
        /// The URL that was requested
        url: String,
        /// The configured timeout in seconds
        secs: u64,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Parse {
            message: error.to_string(),
        }
    }
}

/// Convert errors to process exit codes
///
/// The binary uses this mapping unless it runs in lenient mode.
pub trait ToExitCode {
    /// Get the process exit code for this error
    fn exit_code(&self) -> i32;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToExitCode for Error {
    fn exit_code(&self) -> i32 {
        match self {
            Error::Config { .. } => 2,
            Error::Fetch(_) => 3,
            Error::Parse { .. } => 4,
            Error::Report { .. } => 5,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Fetch(e) => match e {
                FetchError::Status { .. } => "http_status",
                FetchError::Transport { .. } => "transport_error",
                FetchError::Timeout { .. } => "timeout",
                FetchError::Client(_) => "client_error",
            },
            Error::Parse { .. } => "parse_error",
            Error::Report { .. } => "report_error",
        }
    }
}

impl Error {
    /// Build a configuration error for the given settings key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// HTTP status code carried by the error, if the API answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Fetch(FetchError::Status { code, .. }) => Some(*code),
            _ => None,
        }
    }
}

/// Process exit code for the outcome of a run
///
/// Lenient mode reports every outcome as success.
pub fn exit_status<T>(result: &Result<T>, lenient: bool) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) if lenient => 0,
        Err(e) => u8::try_from(e.exit_code()).unwrap_or(1),
    }
}
