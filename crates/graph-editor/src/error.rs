//! Error types for the graph editor
//!
//! Editing operations never fail: an unmet precondition is a silent no-op.
//! These errors only cover the ambient surfaces around the editor, such as
//! loading configuration or decoding a saved graph.

use thiserror::Error;

/// Result type alias using EditorError
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors that can occur outside of graph mutation
#[derive(Debug, Error)]
pub enum EditorError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
