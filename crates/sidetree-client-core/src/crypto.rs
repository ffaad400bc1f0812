//! Hashing primitives: SHA-256 digests wrapped in a multihash envelope.
//!
//! Sidetree identifies content by `base64url(multihash(sha2-256(data)))`,
//! where the multihash envelope is the two bytes `(0x12, 0x20)` followed by
//! the 32-byte digest.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{CoreError, Result};

/// Multihash code for sha2-256.
pub const SHA2_256_CODE: u8 = 0x12;

/// Digest length for sha2-256, in bytes.
pub const SHA2_256_LEN: u8 = 0x20;

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Wrap in a multihash envelope.
    pub fn to_multihash(&self) -> Multihash {
        Multihash {
            code: SHA2_256_CODE,
            digest: self.0.to_vec(),
        }
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", encode_base64url(&self.0[..6]))
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A self-describing digest: `(algorithm code, digest length, digest)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multihash {
    code: u8,
    digest: Vec<u8>,
}

impl Multihash {
    /// The algorithm code.
    pub fn code(&self) -> u8 {
        self.code
    }

    /// The raw digest.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Serialize as `code || len || digest`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(2 + self.digest.len());
        buf.push(self.code);
        buf.push(self.digest.len() as u8);
        buf.extend_from_slice(&self.digest);
        buf
    }

    /// Encode as unpadded base64url text.
    pub fn encode(&self) -> String {
        encode_base64url(&self.to_bytes())
    }

    /// Decode unpadded base64url text, accepting only sha2-256.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = decode_base64url(s)
            .map_err(|e| CoreError::InvalidMultihash(format!("bad encoding: {}", e)))?;

        let (header, digest) = match bytes.as_slice() {
            [code, len, digest @ ..] => ((*code, *len), digest),
            _ => return Err(CoreError::InvalidMultihash("too short".into())),
        };

        if header.0 != SHA2_256_CODE {
            return Err(CoreError::InvalidMultihash(format!(
                "unsupported algorithm code 0x{:02x}",
                header.0
            )));
        }
        if header.1 != SHA2_256_LEN || digest.len() != SHA2_256_LEN as usize {
            return Err(CoreError::InvalidMultihash(format!(
                "declared length {} but digest has {} bytes",
                header.1,
                digest.len()
            )));
        }

        Ok(Self {
            code: header.0,
            digest: digest.to_vec(),
        })
    }
}

/// Hash canonical bytes into the encoded multihash used as a DID suffix.
pub fn content_hash(data: &[u8]) -> String {
    Sha256Hash::hash(data).to_multihash().encode()
}

/// Unpadded base64url encoding.
pub fn encode_base64url(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Unpadded base64url decoding.
pub fn decode_base64url(s: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(s)
}
