//! Server-issued challenge parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PowError, Result};
use crate::work::MIN_SALT_LEN;

/// A challenge as returned by the challenge endpoint.
///
/// Fetched fresh for every submission and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeParameters {
    /// Hex-encoded server nonce, used as the Argon2 salt.
    #[serde(rename = "challengeNonce")]
    pub nonce: String,

    /// How long the challenge stays valid.
    #[serde(rename = "validDurationInMinutes")]
    pub valid_duration_minutes: u64,

    /// Hex-encoded upper bound for an accepted work digest.
    #[serde(rename = "largestAllowedHash")]
    pub target: String,
}

impl ChallengeParameters {
    /// Create challenge parameters.
    pub fn new(
        nonce: impl Into<String>,
        valid_duration_minutes: u64,
        target: impl Into<String>,
    ) -> Self {
        Self {
            nonce: nonce.into(),
            valid_duration_minutes,
            target: target.into(),
        }
    }

    /// The search deadline measured from the start of solving.
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.valid_duration_minutes.saturating_mul(60))
    }

    /// Decode into the salt and normalized target the search works with.
    pub(crate) fn decode(&self) -> Result<DecodedChallenge> {
        let salt = hex::decode(&self.nonce)
            .map_err(|e| PowError::InvalidChallenge(format!("challenge nonce: {}", e)))?;
        if salt.len() < MIN_SALT_LEN {
            return Err(PowError::InvalidChallenge(format!(
                "challenge nonce is {} bytes, need at least {}",
                salt.len(),
                MIN_SALT_LEN
            )));
        }

        // Round-trip so an upper-case target compares like a lower-case one.
        let target = hex::decode(&self.target)
            .map_err(|e| PowError::InvalidChallenge(format!("target: {}", e)))?;

        Ok(DecodedChallenge {
            salt,
            target_hex: hex::encode(target),
            deadline: self.deadline(),
        })
    }
}

/// Challenge parameters in the form the search loop consumes.
#[derive(Debug, Clone)]
pub(crate) struct DecodedChallenge {
    pub salt: Vec<u8>,
    pub target_hex: String,
    pub deadline: Duration,
}
