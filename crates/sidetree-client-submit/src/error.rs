//! Error types for the submit module.

use thiserror::Error;

/// Errors that can occur while submitting an operation.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The operation could not be serialized or decoded.
    #[error("operation error: {0}")]
    Core(#[from] sidetree_client_core::CoreError),

    /// The proof-of-work search failed.
    #[error("proof of work failed: {0}")]
    Solver(#[from] sidetree_client_pow::PowError),

    /// The challenge source failed.
    #[error("challenge fetch failed: {0:#}")]
    ChallengeFetch(anyhow::Error),

    /// The transport failed.
    #[error("transport error: {0:#}")]
    Transport(anyhow::Error),

    /// The blocking solver task panicked or was cancelled.
    #[error("solver worker failed: {0}")]
    Worker(String),
}

/// Result type for submit operations.
pub type Result<T> = std::result::Result<T, SubmitError>;
