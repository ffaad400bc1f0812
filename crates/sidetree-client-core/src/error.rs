//! Error types for the Sidetree client core.

use thiserror::Error;

use crate::types::DidSuffix;

/// Core errors that can occur while building, encoding or parsing operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The identifier string failed structural parsing.
    #[error("malformed DID URI: {0}")]
    MalformedUri(String),

    /// The suffix embedded in a long-form DID does not hash from its payload.
    #[error("suffix mismatch: derived {expected}, claimed {actual}")]
    SuffixMismatch {
        expected: DidSuffix,
        actual: DidSuffix,
    },

    /// Canonicalization met a value it cannot represent.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The `type` tag names no known operation.
    #[error("unsupported operation type: {0}")]
    UnsupportedOperation(String),

    /// A typed operation could not be decoded from JSON.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// A suffix string is not a valid multihash.
    #[error("invalid multihash: {0}")]
    InvalidMultihash(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Encoding(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
