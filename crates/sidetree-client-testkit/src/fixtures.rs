//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: sample operations and a client
//! wired to in-memory collaborators.

use std::sync::Arc;

use serde_json::json;
use sidetree_client::{Client, ClientConfig};
use sidetree_client_core::{
    CreateOperation, DeactivateOperation, Delta, Patch, RecoverOperation, SuffixData,
    UpdateOperation,
};
use sidetree_client_pow::ChallengeParameters;
use sidetree_client_submit::{ChallengeSource, RecordingTransport, StaticChallengeSource};

/// Server nonce used by the canned challenges. Long enough to be a valid salt.
pub const SERVER_NONCE: &str = "0123456789abcdef0123456789abcdef";

/// A challenge every digest satisfies.
///
/// 66 hex characters of `f` sort above any 64-character digest.
pub fn permissive_challenge() -> ChallengeParameters {
    ChallengeParameters::new(SERVER_NONCE, 1, "ff".repeat(33))
}

/// A challenge no digest satisfies, already expired.
pub fn impossible_challenge() -> ChallengeParameters {
    ChallengeParameters::new(SERVER_NONCE, 0, "00")
}

/// A `replace` patch with one service.
pub fn sample_patch(service_id: &str) -> Patch {
    let value = json!({
        "action": "replace",
        "document": {
            "publicKeys": [],
            "services": [{
                "id": service_id,
                "type": "LinkedDomains",
                "serviceEndpoint": "https://example.com"
            }]
        }
    });
    match value {
        serde_json::Value::Object(patch) => patch,
        _ => unreachable!("patch literal is an object"),
    }
}

/// A create operation whose `deltaHash` commits to its delta.
pub fn sample_create(service_id: &str) -> CreateOperation {
    let delta = Delta::new(vec![sample_patch(service_id)], "EiUpdateCommitment");
    let delta_hash = delta.hash().expect("sample delta encodes");
    CreateOperation::new(SuffixData::new(delta_hash, "EiRecoveryCommitment"), delta)
}

pub fn sample_update(did_suffix: &str) -> UpdateOperation {
    UpdateOperation::new(
        did_suffix,
        "EiRevealUpdate",
        "eyJhbGciOiJFUzI1NksifQ.update.sig",
        Delta::new(vec![sample_patch("updated")], "EiNextUpdate"),
    )
}

pub fn sample_recover(did_suffix: &str) -> RecoverOperation {
    RecoverOperation::new(
        did_suffix,
        "EiRevealRecovery",
        "eyJhbGciOiJFUzI1NksifQ.recover.sig",
        Delta::new(vec![sample_patch("recovered")], "EiNextUpdate"),
    )
}

pub fn sample_deactivate(did_suffix: &str) -> DeactivateOperation {
    DeactivateOperation::new(
        did_suffix,
        "EiRevealRecovery",
        "eyJhbGciOiJFUzI1NksifQ.deactivate.sig",
    )
}

/// A client wired to a recording transport and, optionally, a static
/// challenge source.
pub struct TestFixture {
    pub client: Client,
    pub transport: Arc<RecordingTransport>,
    pub challenge: Option<Arc<StaticChallengeSource>>,
}

impl TestFixture {
    /// A client that sends without proof of work.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A client that proves work against the given challenge.
    pub fn with_challenge(params: ChallengeParameters) -> Self {
        Self::build(Some(Arc::new(StaticChallengeSource::new(params))))
    }

    fn build(challenge: Option<Arc<StaticChallengeSource>>) -> Self {
        let transport = Arc::new(RecordingTransport::new(r#"{"status":"accepted"}"#));
        let client = Client::with_collaborators(
            ClientConfig::new("memory://operations"),
            transport.clone(),
            challenge
                .clone()
                .map(|c| c as Arc<dyn ChallengeSource>),
        )
        .expect("fixture config is valid");

        Self {
            client,
            transport,
            challenge,
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
