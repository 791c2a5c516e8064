//! Error types for workflow services

use thiserror::Error;

/// Result type alias using ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors reported by backends and collaborators
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The workflow backend failed
    #[error("Backend error: {0}")]
    Backend(String),

    /// No workflow has the given id
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(String),

    /// Email/password pair was rejected
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Any other authentication failure
    #[error("{0}")]
    Auth(String),

    /// Persisting a workflow failed
    #[error("Save failed: {0}")]
    SaveFailed(String),
}

impl ServiceError {
    /// Create a backend error with a message
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
