//! Error types for the analysis client

use thiserror::Error;
use underwriter_core::UnderwriterError;

/// Message shown for any wallet failure that has no HTTP status to report
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

/// Unified error type for remote analysis calls
#[derive(Error, Debug)]
pub enum ClientError {
    /// Empty input; the request is never dispatched
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Non-2xx response
    #[error("API error {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    /// Body could not be parsed into the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Body parsed but violates payload invariants
    #[error("Malformed response: {0}")]
    Payload(#[from] UnderwriterError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ClientError {
    /// Short message for the wallet error banner.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status(code) => format!("API error {}", code),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Map a reqwest error, keeping the HTTP status when there is one.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ClientError::Status(status.as_u16())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Validate an analysis identifier (wallet address or protocol id)
pub fn validate_identifier(identifier: &str) -> Result<&str> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidInput("Identifier cannot be empty".into()));
    }
    Ok(trimmed)
}
