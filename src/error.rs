//! Error types for drive-export
//!
//! The taxonomy mirrors how failures propagate through a run:
//! - [`Error`] — run-fatal conditions (setup validation, pagination,
//!   authentication, infrastructure)
//! - [`TransferError`] — per-item failures; these never escape the transfer
//!   executor and are converted into [`FailureRecord`]s instead
//!
//! [`FailureRecord`]: crate::types::FailureRecord

use thiserror::Error;

/// Result type alias for drive-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Run-fatal error type for drive-export
#[derive(Debug, Error)]
pub enum Error {
    /// Setup validation failed before any page was fetched
    #[error("setup error: {message}")]
    Setup {
        /// Human-readable description of the precondition that failed
        message: String,
    },

    /// Authentication failure (no usable token material, refresh rejected)
    #[error("authentication error: {0}")]
    Auth(String),

    /// Transport or API failure while fetching a listing page
    ///
    /// Fatal to the run: pagination state cannot be reconstructed once a page
    /// fails mid-stream, so there is no per-page retry.
    #[error("pagination error: {0}")]
    Pagination(String),

    /// Remote API returned a non-success status
    #[error("remote API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body text, as returned by the server
        body: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL in configuration
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Convenience constructor for setup validation failures
    pub fn setup(message: impl Into<String>) -> Self {
        Error::Setup {
            message: message.into(),
        }
    }
}

/// Per-item transfer failure
///
/// Produced inside the transfer executor and converted to a
/// [`FailureRecord`](crate::types::FailureRecord) by the run orchestrator;
/// it never aborts sibling transfers.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Opening the content or conversion stream failed
    #[error("failed to open content stream: {0}")]
    Open(String),

    /// The byte stream errored mid-transfer
    #[error("stream error: {0}")]
    Stream(String),

    /// Writing the destination file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
