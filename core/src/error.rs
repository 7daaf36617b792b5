//! Error types for the imgflip API client.
//!
//! # Design
//! Every variant carries owned strings so an `ApiError` can be cloned into a
//! `CaptionResult` and still compare equal to the message stored beside it.
//! `Transport` and `HttpStatus` are both transport-class failures; the split
//! keeps the raw status and body around for debugging.

use thiserror::Error;

/// Message used when the remote API reports failure without saying why.
pub const UNSUCCESSFUL_REQUEST: &str = "request was unsuccessful";

/// Errors produced while building, sending, or interpreting a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required local argument was missing. Raised before any I/O.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The exchange itself failed: connection error, unreadable or empty body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server returned a non-2xx status without a decodable envelope.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not valid JSON for the expected envelope.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The envelope decoded fine but reported `success: false`.
    #[error("{0}")]
    RemoteRejection(String),

    /// The request could not be turned into form fields.
    #[error("encoding request failed: {0}")]
    Encode(String),
}

impl ApiError {
    /// Build a rejection, substituting the generic message for an empty one.
    pub fn rejection(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ApiError::RemoteRejection(UNSUCCESSFUL_REQUEST.to_string())
        } else {
            ApiError::RemoteRejection(message)
        }
    }

    /// True for failures of the exchange rather than of the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::HttpStatus { .. })
    }
}
