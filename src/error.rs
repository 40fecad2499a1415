//! Error types for ssdbkv
//!
//! Provides a unified error type for all client operations.
//!
//! A `not_found` status from the store is never an error: each operation
//! turns it into its natural empty value. Everything in [`SsdbError`] is a
//! genuine failure the caller must be able to tell apart from an empty
//! result.

use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias using SsdbError
pub type Result<T> = std::result::Result<T, SsdbError>;

/// Unified error type for ssdbkv operations
#[derive(Debug, Error)]
pub enum SsdbError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// The connection failed while executing a command (broken pipe,
    /// timeout, peer closed the socket, ...)
    #[error("transport error during {command}: {source}")]
    Transport {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure outside of a command round trip (e.g. connecting)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The store answered with a status other than `ok` / `not_found`
    #[error("access store error, command {command}, code is {response:?}, parameter is {params:?}")]
    Protocol {
        command: String,
        status: String,
        params: Vec<String>,
        response: Vec<String>,
    },

    /// The store answered `ok` but the payload has the wrong shape
    #[error("malformed response to {command}: {reason} (response {response:?})")]
    MalformedResponse {
        command: String,
        reason: String,
        response: Vec<String>,
    },

    /// An integer payload could not be parsed
    #[error("cannot decode {value:?} returned by {command} as an integer: {source}")]
    Decode {
        command: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("auth failed: {0}")]
    Auth(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SsdbError {
    /// True when the underlying connection failed
    pub fn is_transport(&self) -> bool {
        matches!(self, SsdbError::Transport { .. } | SsdbError::Io(_))
    }

    /// True when the store answered but the answer was an error or unusable
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            SsdbError::Protocol { .. } | SsdbError::MalformedResponse { .. } | SsdbError::Decode { .. }
        )
    }
}
