//! Error types for the client.

use sidetree_client_core::CoreError;
use sidetree_client_submit::SubmitError;
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Building, encoding or parsing an operation failed.
    #[error("operation error: {0}")]
    Core(#[from] CoreError),

    /// Submitting an operation failed.
    #[error("submit error: {0}")]
    Submit(#[from] SubmitError),

    /// The client configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
