//! Error types for the matchit-core library.

use thiserror::Error;

/// Main error type for the matchit library.
#[derive(Error, Debug)]
pub enum MatchitError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Saved flyer data could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be understood.
    #[error("configuration error: {0}")]
    Config(String),

    /// Nothing usable has been analyzed yet.
    #[error("no usable flyer data")]
    NoData,
}

/// Failure of a single flyer analysis request.
///
/// Each variant is terminal for the flyer it belongs to; the batch carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The upstream service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response was well formed but contained no analysis.
    #[error("no analysis generated")]
    EmptyResponse,

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The image could not be decoded or re-encoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// No API key was found in the environment.
    #[error("API key not set (expected environment variable {0})")]
    MissingApiKey(String),
}

/// Result type for the matchit library.
pub type Result<T> = std::result::Result<T, MatchitError>;
