//! Operations: the four Sidetree change requests and their payloads.
//!
//! A create operation is self-certifying: its DID suffix is the content hash
//! of its [`SuffixData`]. Update, recover and deactivate operations address an
//! existing DID by a caller-supplied suffix and carry opaque reveal values
//! and signed data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::canonical::canonicalize;
use crate::crypto::content_hash;
use crate::error::{CoreError, Result};
use crate::long_form::encode_payload;
use crate::types::DidSuffix;

/// A single document patch. Opaque to this crate.
pub type Patch = serde_json::Map<String, Value>;

/// The data whose canonical hash becomes the DID suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SuffixData {
    /// Optional type hint for the DID.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// Content hash of the create operation's delta.
    pub delta_hash: String,

    /// Commitment to the recovery key.
    pub recovery_commitment: String,

    /// Optional anchoring origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_origin: Option<String>,
}

impl SuffixData {
    /// Create suffix data without the optional fields.
    pub fn new(delta_hash: impl Into<String>, recovery_commitment: impl Into<String>) -> Self {
        Self {
            r#type: None,
            delta_hash: delta_hash.into(),
            recovery_commitment: recovery_commitment.into(),
            anchor_origin: None,
        }
    }

    /// Set the type hint.
    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.r#type = Some(ty.into());
        self
    }

    /// Set the anchor origin.
    pub fn with_anchor_origin(mut self, origin: impl Into<String>) -> Self {
        self.anchor_origin = Some(origin.into());
        self
    }

    /// Derive the DID suffix: `content_hash(canonicalize(self))`.
    pub fn suffix(&self) -> Result<DidSuffix> {
        let bytes = canonicalize(self)?;
        Ok(DidSuffix::new(content_hash(&bytes)))
    }
}

/// A set of patches plus the commitment for the next update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Delta {
    /// Ordered patches. `null` or missing decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub patches: Vec<Patch>,

    /// Commitment to the next update key.
    pub update_commitment: String,
}

impl Delta {
    /// Create a delta.
    pub fn new(patches: Vec<Patch>, update_commitment: impl Into<String>) -> Self {
        Self {
            patches,
            update_commitment: update_commitment.into(),
        }
    }

    /// Content hash of the canonical delta, the value expected in
    /// [`SuffixData::delta_hash`].
    pub fn hash(&self) -> Result<String> {
        let bytes = canonicalize(self)?;
        Ok(content_hash(&bytes))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Patch>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Patch>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Discriminator carried in the `type` field of every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Update,
    Recover,
    Deactivate,
}

impl OperationKind {
    /// The wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Recover => "recover",
            Self::Deactivate => "deactivate",
        }
    }

    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "recover" => Some(Self::Recover),
            "deactivate" => Some(Self::Deactivate),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create a new DID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOperation {
    pub suffix_data: SuffixData,
    pub delta: Delta,
}

impl CreateOperation {
    /// Build a create operation.
    pub fn new(suffix_data: SuffixData, delta: Delta) -> Self {
        Self { suffix_data, delta }
    }

    /// The DID suffix this operation creates.
    pub fn suffix(&self) -> Result<DidSuffix> {
        self.suffix_data.suffix()
    }

    /// `did:<method>:<suffix>`
    pub fn short_form_uri(&self, method: &str) -> Result<String> {
        let suffix = self.suffix()?;
        Ok(format!("did:{}:{}", method, suffix))
    }

    /// `did:<method>:<suffix>:<payload>`, verifiable without a ledger.
    pub fn long_form_uri(&self, method: &str) -> Result<String> {
        let short = self.short_form_uri(method)?;
        let payload = self.encoded_payload()?;
        Ok(format!("{}:{}", short, payload))
    }

    /// The long-form payload segment alone.
    pub fn encoded_payload(&self) -> Result<String> {
        encode_payload(&self.suffix_data, &self.delta)
    }
}

/// Apply a delta to an existing DID using the update key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOperation {
    pub did_suffix: DidSuffix,
    pub reveal_value: String,
    pub signed_data: String,
    pub delta: Delta,
}

impl UpdateOperation {
    pub fn new(
        did_suffix: impl Into<DidSuffix>,
        reveal_value: impl Into<String>,
        signed_data: impl Into<String>,
        delta: Delta,
    ) -> Self {
        Self {
            did_suffix: did_suffix.into(),
            reveal_value: reveal_value.into(),
            signed_data: signed_data.into(),
            delta,
        }
    }
}

/// Replace the document and keys of an existing DID using the recovery key.
///
/// Same shape as [`UpdateOperation`], deliberately a separate type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverOperation {
    pub did_suffix: DidSuffix,
    pub reveal_value: String,
    pub signed_data: String,
    pub delta: Delta,
}

impl RecoverOperation {
    pub fn new(
        did_suffix: impl Into<DidSuffix>,
        reveal_value: impl Into<String>,
        signed_data: impl Into<String>,
        delta: Delta,
    ) -> Self {
        Self {
            did_suffix: did_suffix.into(),
            reveal_value: reveal_value.into(),
            signed_data: signed_data.into(),
            delta,
        }
    }
}

/// Permanently deactivate an existing DID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateOperation {
    pub did_suffix: DidSuffix,
    pub reveal_value: String,
    pub signed_data: String,
}

impl DeactivateOperation {
    pub fn new(
        did_suffix: impl Into<DidSuffix>,
        reveal_value: impl Into<String>,
        signed_data: impl Into<String>,
    ) -> Self {
        Self {
            did_suffix: did_suffix.into(),
            reveal_value: reveal_value.into(),
            signed_data: signed_data.into(),
        }
    }
}

/// Any of the four operations, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    Create(CreateOperation),
    Update(UpdateOperation),
    Recover(RecoverOperation),
    Deactivate(DeactivateOperation),
}

impl Operation {
    /// The operation's discriminator.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Create(_) => OperationKind::Create,
            Self::Update(_) => OperationKind::Update,
            Self::Recover(_) => OperationKind::Recover,
            Self::Deactivate(_) => OperationKind::Deactivate,
        }
    }

    /// The DID this operation targets.
    pub fn did_suffix(&self) -> Result<DidSuffix> {
        match self {
            Self::Create(op) => op.suffix(),
            Self::Update(op) => Ok(op.did_suffix.clone()),
            Self::Recover(op) => Ok(op.did_suffix.clone()),
            Self::Deactivate(op) => Ok(op.did_suffix.clone()),
        }
    }

    /// Canonical JSON request body.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>> {
        canonicalize(self)
    }

    /// Decode an untyped JSON operation.
    ///
    /// The `type` tag is checked before the body. A value that is not an
    /// object, lacks a string tag, or carries an unknown one is reported as
    /// [`CoreError::UnsupportedOperation`]. Only a malformed body for a
    /// known tag is a decoding failure.
    pub fn from_value(value: Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| CoreError::UnsupportedOperation("not a JSON object".into()))?;
        let tag = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::UnsupportedOperation("missing `type` tag".into()))?;

        if OperationKind::from_tag(tag).is_none() {
            return Err(CoreError::UnsupportedOperation(tag.to_string()));
        }

        serde_json::from_value(value).map_err(|e| CoreError::Decoding(e.to_string()))
    }
}

impl From<CreateOperation> for Operation {
    fn from(op: CreateOperation) -> Self {
        Self::Create(op)
    }
}

impl From<UpdateOperation> for Operation {
    fn from(op: UpdateOperation) -> Self {
        Self::Update(op)
    }
}

impl From<RecoverOperation> for Operation {
    fn from(op: RecoverOperation) -> Self {
        Self::Recover(op)
    }
}

impl From<DeactivateOperation> for Operation {
    fn from(op: DeactivateOperation) -> Self {
        Self::Deactivate(op)
    }
}
