//! Error types for the proof-of-work module.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while solving a challenge.
#[derive(Debug, Error)]
pub enum PowError {
    /// The search ran past the challenge's validity window.
    #[error("deadline exceeded after {attempts} attempts in {elapsed:?}")]
    DeadlineExceeded { attempts: u64, elapsed: Duration },

    /// The configured attempt cap was reached before a solution was found.
    #[error("gave up after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },

    /// The server-issued parameters are unusable.
    #[error("invalid challenge: {0}")]
    InvalidChallenge(String),

    /// Argon2 rejected its inputs.
    #[error("key derivation error: {0}")]
    KeyDerivation(String),

    /// A nonce was not valid hex text.
    #[error("nonce encoding error: {0}")]
    NonceEncoding(#[from] hex::FromHexError),
}

/// Result type for proof-of-work operations.
pub type Result<T> = std::result::Result<T, PowError>;
