//! Error types for the exercise tracker

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Missing or malformed input field
    #[error("{0}")]
    Validation(String),

    /// Unique constraint violation
    #[error("{0}")]
    DuplicateKey(String),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        TrackerError::Validation(message.into())
    }

    pub fn user_not_found(id: &str) -> Self {
        TrackerError::NotFound(format!("Unknown user id: {}", id))
    }

    pub fn username_taken(username: &str) -> Self {
        TrackerError::DuplicateKey(format!("Username already taken: {}", username))
    }

    /// Whether the failure was caused by the client's request
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TrackerError::Storage(_))
    }
}
