//! Error types for the stopfake coordinator
//!
//! Domain-specific errors are defined per module concern and wrapped by the
//! unified [`Error`] enum for use across module boundaries. Analysis
//! failures never escape the coordinator; they are folded into the session's
//! `Error` state and only a display string is exposed further up.

use thiserror::Error;

/// Errors from a single analysis attempt against the backend
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Transport-level failure (DNS, connection refused, timeout)
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("backend returned status {0}")]
    BackendRejected(u16),

    /// Backend answered with a success status but an unparseable body
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Short kind tag, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "unreachable",
            Self::BackendRejected(_) => "rejected",
            Self::MalformedResponse(_) => "malformed",
        }
    }
}

/// Errors from the page-text extraction pipeline
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No usable text found in the document
    #[error("no text available in document")]
    NoText,

    /// Text is below the minimum length worth analyzing
    #[error("text too short for analysis: {len} chars (minimum {min})")]
    TooShort {
        /// Extracted text length in chars
        len: usize,
        /// Configured minimum
        min: usize,
    },
}

/// Errors from the HTTP host server
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid server configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to bind the listen address
    #[error("failed to bind address: {0}")]
    Bind(String),

    /// Failure while serving requests
    #[error("server error: {0}")]
    Serve(String),
}

/// Unified error type for the stopfake crate
#[derive(Error, Debug)]
pub enum Error {
    /// Analysis attempt error
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Extraction error
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// HTTP host error
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias using the unified [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
