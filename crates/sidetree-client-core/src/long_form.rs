//! Long-form DID codec.
//!
//! A long-form DID embeds its own create payload:
//!
//! ```text
//! did:<method>:<suffix>:<base64url(jcs({"delta": .., "suffixData": ..}))>
//! ```
//!
//! Parsing re-derives the suffix from the embedded suffix data and rejects
//! the identifier if it differs from the claimed one. This is the only way a
//! long-form DID is accepted anywhere in the workspace.

use serde::{Deserialize, Serialize};

use crate::canonical::canonicalize;
use crate::crypto::{decode_base64url, encode_base64url, Multihash};
use crate::error::{CoreError, Result};
use crate::operation::{CreateOperation, Delta, SuffixData};
use crate::types::DidSuffix;

/// The structure carried in the payload segment.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct LongFormPayload {
    delta: Delta,
    suffix_data: SuffixData,
}

/// Encode the payload segment for a create operation.
pub fn encode_payload(suffix_data: &SuffixData, delta: &Delta) -> Result<String> {
    let payload = LongFormPayload {
        delta: delta.clone(),
        suffix_data: suffix_data.clone(),
    };
    let bytes = canonicalize(&payload)?;
    Ok(encode_base64url(&bytes))
}

/// Parse and verify a long-form DID, returning its create payload.
pub fn parse_long_form(uri: &str) -> Result<(SuffixData, Delta)> {
    LongFormDid::parse(uri).map(LongFormDid::into_parts)
}

/// A verified long-form DID.
#[derive(Debug, Clone, PartialEq)]
pub struct LongFormDid {
    /// Method name (everything between `did:` and the suffix), when the
    /// identifier has the full `did:<method>:...` shape.
    pub method: Option<String>,
    pub suffix: DidSuffix,
    pub suffix_data: SuffixData,
    pub delta: Delta,
}

impl LongFormDid {
    /// Parse and verify a long-form DID.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MalformedUri`] if there are fewer than two `:`-separated
    ///   segments, the payload is not unpadded base64url, the decoded payload
    ///   is not `{delta, suffixData}`, or the delta does not match a
    ///   multihash `deltaHash`.
    /// - [`CoreError::SuffixMismatch`] if the claimed suffix is not the hash of
    ///   the embedded suffix data.
    pub fn parse(uri: &str) -> Result<Self> {
        let segments: Vec<&str> = uri.split(':').collect();
        if segments.len() < 2 {
            return Err(CoreError::MalformedUri(format!(
                "expected at least 2 segments, got {}",
                segments.len()
            )));
        }

        let n = segments.len();
        let claimed = DidSuffix::new(segments[n - 2]);
        let encoded = segments[n - 1];

        let bytes = decode_base64url(encoded)
            .map_err(|e| CoreError::MalformedUri(format!("payload is not base64url: {}", e)))?;

        let payload: LongFormPayload = serde_json::from_slice(&bytes)
            .map_err(|e| CoreError::MalformedUri(format!("invalid payload: {}", e)))?;

        let derived = payload.suffix_data.suffix()?;
        if derived != claimed {
            return Err(CoreError::SuffixMismatch {
                expected: derived,
                actual: claimed,
            });
        }

        verify_delta_commitment(&payload.suffix_data, &payload.delta)?;

        let method = match segments.as_slice() {
            ["did", method @ .., _, _] if !method.is_empty() => Some(method.join(":")),
            _ => None,
        };

        Ok(Self {
            method,
            suffix: claimed,
            suffix_data: payload.suffix_data,
            delta: payload.delta,
        })
    }

    /// The short form of this DID, if the method is known.
    pub fn short_form(&self) -> Option<String> {
        self.method
            .as_ref()
            .map(|method| format!("did:{}:{}", method, self.suffix))
    }

    /// Rebuild the create operation this DID encodes.
    pub fn to_create(&self) -> CreateOperation {
        CreateOperation::new(self.suffix_data.clone(), self.delta.clone())
    }

    /// Split into the create payload.
    pub fn into_parts(self) -> (SuffixData, Delta) {
        (self.suffix_data, self.delta)
    }
}

/// Check the delta against `deltaHash` when the latter is a sha2-256
/// multihash. Opaque `deltaHash` values are carried unverified.
fn verify_delta_commitment(suffix_data: &SuffixData, delta: &Delta) -> Result<()> {
    if Multihash::decode(&suffix_data.delta_hash).is_err() {
        return Ok(());
    }

    let actual = delta.hash()?;
    if actual != suffix_data.delta_hash {
        return Err(CoreError::MalformedUri(format!(
            "delta does not match deltaHash: {} != {}",
            actual, suffix_data.delta_hash
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn committed_create() -> CreateOperation {
        let patch = json!({
            "action": "replace",
            "document": {"publicKeys": [], "services": [{"id": "svc", "type": "Web"}]}
        });
        let delta = Delta::new(vec![patch.as_object().unwrap().clone()], "EiUpdate");
        let suffix_data = SuffixData::new(delta.hash().unwrap(), "EiRecovery");
        CreateOperation::new(suffix_data, delta)
    }

    #[test]
    fn test_roundtrip() {
        let op = CreateOperation::new(SuffixData::new("h1", "c1"), Delta::new(vec![], "u1"));
        let uri = op.long_form_uri("m").unwrap();

        let (suffix_data, delta) = parse_long_form(&uri).unwrap();
        assert_eq!(suffix_data, op.suffix_data);
        assert_eq!(delta, op.delta);
    }

    #[test]
    fn test_parse_exposes_method_and_short_form() {
        let op = committed_create();
        let uri = op.long_form_uri("ion:test").unwrap();

        let did = LongFormDid::parse(&uri).unwrap();
        assert_eq!(did.method.as_deref(), Some("ion:test"));
        assert_eq!(did.short_form().unwrap(), op.short_form_uri("ion:test").unwrap());
        assert_eq!(did.to_create(), op);
    }

    #[test]
    fn test_bare_suffix_and_payload() {
        let op = committed_create();
        let uri = format!("{}:{}", op.suffix().unwrap(), op.encoded_payload().unwrap());

        let did = LongFormDid::parse(&uri).unwrap();
        assert_eq!(did.method, None);
        assert_eq!(did.short_form(), None);
    }

    #[test]
    fn test_malformed_inputs() {
        for uri in ["", "did", "no-colon-at-all"] {
            assert!(
                matches!(parse_long_form(uri), Err(CoreError::MalformedUri(_))),
                "{uri:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_bad_base64() {
        let err = parse_long_form("did:ion:EiAsuffix:not base64!").unwrap_err();
        assert!(matches!(err, CoreError::MalformedUri(_)));
    }

    #[test]
    fn test_bad_structure() {
        let payload = encode_base64url(br#"{"hello":"world"}"#);
        let err = parse_long_form(&format!("did:ion:EiAsuffix:{}", payload)).unwrap_err();
        assert!(matches!(err, CoreError::MalformedUri(_)));
    }

    #[test]
    fn test_wrong_suffix() {
        let op = committed_create();
        let other = CreateOperation::new(SuffixData::new("x", "y"), Delta::new(vec![], "z"));
        let uri = format!(
            "did:ion:{}:{}",
            other.suffix().unwrap(),
            op.encoded_payload().unwrap()
        );

        match parse_long_form(&uri) {
            Err(CoreError::SuffixMismatch { expected, actual }) => {
                assert_eq!(expected, op.suffix().unwrap());
                assert_eq!(actual, other.suffix().unwrap());
            }
            other => panic!("expected SuffixMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_tampered_delta_rejected() {
        let op = committed_create();
        let mut tampered = op.clone();
        tampered.delta.update_commitment = "EiAttacker".into();

        let uri = format!(
            "did:ion:{}:{}",
            op.suffix().unwrap(),
            tampered.encoded_payload().unwrap()
        );
        assert!(matches!(parse_long_form(&uri), Err(CoreError::MalformedUri(_))));
    }

    #[test]
    fn test_opaque_delta_hash_carries_delta_unverified() {
        let op = CreateOperation::new(SuffixData::new("h1", "c1"), Delta::new(vec![], "u1"));
        let mut tampered = op.clone();
        tampered.delta.update_commitment = "p1".into();

        let uri = format!(
            "did:m:{}:{}",
            op.suffix().unwrap(),
            tampered.encoded_payload().unwrap()
        );
        let (suffix_data, delta) = parse_long_form(&uri).unwrap();
        assert_eq!(suffix_data, op.suffix_data);
        assert_eq!(delta.update_commitment, "p1");
    }

    #[test]
    fn test_every_single_character_flip_detected() {
        let op = committed_create();
        let uri = op.long_form_uri("ion").unwrap();
        let split = uri.rfind(':').unwrap() + 1;

        for i in split..uri.len() {
            let mut chars: Vec<char> = uri.chars().collect();
            chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
            let flipped: String = chars.into_iter().collect();

            let result = parse_long_form(&flipped);
            assert!(
                matches!(
                    result,
                    Err(CoreError::SuffixMismatch { .. }) | Err(CoreError::MalformedUri(_))
                ),
                "flip at {} was accepted: {:?}",
                i,
                result
            );
        }
    }
}
