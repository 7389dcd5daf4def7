/*!
 * Error types for the subrelay application.
 *
 * This module contains custom error types for the backend and pipeline
 * layers, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Error when making the HTTP request fails (connection, timeout)
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    /// Error when decoding the response body fails
    #[error("Failed to decode backend response: {0}")]
    ParseError(String),

    /// Credential or billing rejection (HTTP 400/403); never retried
    #[error("Backend rejected the request: {status_code} - {message}")]
    Auth {
        /// HTTP status code
        status_code: u16,
        /// Error message from the backend
        message: String,
    },

    /// Any other non-success transport status; never retried
    #[error("Backend transport error: {status_code} - {message}")]
    Transport {
        /// HTTP status code
        status_code: u16,
        /// Error message from the backend
        message: String,
    },
}

impl BackendError {
    /// Classify a non-success HTTP status: 400 and 403 signal a credential
    /// or billing rejection, anything else is a transport failure
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            400 | 403 => Self::Auth { status_code, message },
            _ => Self::Transport { status_code, message },
        }
    }
}

/// Errors that can occur while running the translation pipeline
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the backend client
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A stripped cue text already contains the batch delimiter token
    #[error("Cue {cue_index} contains the batch delimiter; refusing to batch it")]
    DelimiterCollision {
        /// Index of the offending cue
        cue_index: usize,
    },

    /// The reply did not yield exactly one segment per submitted text
    #[error("Malformed backend response: expected {expected} segments, recovered {received}")]
    MalformedResponse {
        /// Number of texts submitted in the batch
        expected: usize,
        /// Number of segments recovered from the reply
        received: usize,
    },
}
