//! Strong type definitions for the Sidetree client.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::Multihash;
use crate::error::Result;

/// The content-hash fragment of a DID, `base64url(multihash(sha256(jcs(suffixData))))`.
///
/// Two create operations with the same suffix data have the same suffix.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DidSuffix(String);

impl DidSuffix {
    /// Wrap a suffix string without validating it.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the suffix text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the suffix is a well-formed sha2-256 multihash.
    pub fn validate(&self) -> Result<()> {
        Multihash::decode(&self.0).map(|_| ())
    }
}

impl fmt::Debug for DidSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DidSuffix({})", self.0)
    }
}

impl fmt::Display for DidSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DidSuffix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for DidSuffix {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DidSuffix {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for DidSuffix {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DidSuffix {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
