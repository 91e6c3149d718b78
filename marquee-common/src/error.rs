//! Common error types for the marquee content layer

use thiserror::Error;

/// Common result type for marquee operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds surfaced by the content layer
///
/// Callers never see transport-specific error types; network and server
/// failures are folded into `Api` with a human-readable message.
#[derive(Error, Debug)]
pub enum Error {
    /// Required field missing or empty, rejected before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Video identifier could not be extracted from the given source URL
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Non-2xx response or transport failure, message from the server's
    /// error body when available, otherwise the status line
    #[error("API error: {0}")]
    Api(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
