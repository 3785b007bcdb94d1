//! Error types for the HackMD client

use thiserror::Error;

/// Core error type for HackMD client operations
#[derive(Error, Debug)]
pub enum HackmdError {
    /// The API token is absent or empty
    #[error("HACKMD_API_TOKEN environment variable is not set.")]
    MissingToken,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed command input
    #[error("{0}")]
    Validation(String),

    /// Non-success HTTP status from the remote service
    #[error("API request failed: {status} {status_text}\n{body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Network-level failures (DNS, connection refused, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the JSON we expected
    #[error("Parse error: {0}")]
    Parse(String),
}

impl HackmdError {
    /// HTTP status of a remote error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            HackmdError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for HackMD operations
pub type Result<T> = std::result::Result<T, HackmdError>;

impl From<serde_json::Error> for HackmdError {
    fn from(err: serde_json::Error) -> Self {
        HackmdError::Parse(err.to_string())
    }
}
