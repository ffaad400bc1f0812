//! Client nonce generation.
//!
//! A nonce is `hex(hex(bytes))` for a random number of random bytes, cut to
//! at most [`MAX_NONCE_CHARS`] characters. The double encoding is part of
//! the proof format and must not be simplified.

use rand::Rng;

use crate::error::Result;

/// Random byte count is drawn from `0..MAX_NONCE_BYTES`.
pub const MAX_NONCE_BYTES: usize = 500;

/// Longest nonce text sent to the server.
pub const MAX_NONCE_CHARS: usize = 1000;

/// Generate a candidate nonce.
pub fn generate_nonce<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(0..MAX_NONCE_BYTES);
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);

    let mut nonce = hex::encode(hex::encode(bytes));
    nonce.truncate(MAX_NONCE_CHARS);
    nonce
}

/// Undo one layer of hex encoding, giving the bytes mixed into the password.
pub fn nonce_bytes(nonce: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(nonce)?)
}
