//! The Argon2id work function.
//!
//! `work = Argon2id(password = rawNonce || request, salt = challengeNonce)`
//! with one pass over 1000 KiB and a 32-byte output.

use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{PowError, Result};

/// Argon2 passes.
pub const TIME_COST: u32 = 1;

/// Argon2 memory in KiB.
pub const MEMORY_COST_KIB: u32 = 1000;

/// Argon2 lanes.
pub const PARALLELISM: u32 = 1;

/// Work digest length in bytes.
pub const OUTPUT_LEN: usize = 32;

/// Shortest salt Argon2 accepts.
pub const MIN_SALT_LEN: usize = 8;

/// A configured Argon2id instance, built once per solve.
pub struct WorkFunction {
    argon2: Argon2<'static>,
}

impl WorkFunction {
    /// Build the work function with the fixed challenge parameters.
    pub fn new() -> Result<Self> {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
            .map_err(|e| PowError::KeyDerivation(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Compute the digest for one candidate.
    pub fn compute(
        &self,
        raw_nonce: &[u8],
        request: &[u8],
        salt: &[u8],
    ) -> Result<[u8; OUTPUT_LEN]> {
        let mut password = Vec::with_capacity(raw_nonce.len() + request.len());
        password.extend_from_slice(raw_nonce);
        password.extend_from_slice(request);

        let mut out = [0u8; OUTPUT_LEN];
        self.argon2
            .hash_password_into(&password, salt, &mut out)
            .map_err(|e| PowError::KeyDerivation(e.to_string()))?;
        Ok(out)
    }
}
