use std::time::Duration;
use thiserror::Error;

/// Errors produced while talking to the Time Saver backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Not authorized")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The caller is not entitled to the resource (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Failures that may go away on their own and can be papered over with
    /// cached or placeholder data.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Timeout(_) | ClientError::Network(_) => true,
            ClientError::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
