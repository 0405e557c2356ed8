//! Error types for voice-morpher
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation.
//!
//! An unrecognized effect identifier is deliberately NOT represented here:
//! unknown effects mean passthrough, never failure.

use thiserror::Error;

/// Main error type for voice-morpher
#[derive(Error, Debug)]
pub enum Error {
    /// Audio decoding errors (unparseable, truncated, or empty input)
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// WAV serialization errors
    #[error("Audio encode error: {0}")]
    Encode(String),

    /// Invalid request (transport layer only)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using voice-morpher Error
pub type Result<T> = std::result::Result<T, Error>;
