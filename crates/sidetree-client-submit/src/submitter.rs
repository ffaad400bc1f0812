//! Submission flow: serialize, optionally prove work, send.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use sidetree_client_core::Operation;
use sidetree_client_pow::{ChallengeSolver, SolverConfig};
use tracing::{debug, info};

use crate::challenge::ChallengeSource;
use crate::error::{Result, SubmitError};
use crate::request::{headers, SubmitRequest};
use crate::transport::Transport;

/// Configuration for submissions.
#[derive(Debug, Clone, Default)]
pub struct SubmitConfig {
    /// Solver settings used when a challenge source is present.
    pub solver: SolverConfig,
}

/// Sends operations through a transport, proving work when a challenge
/// source is configured.
pub struct Submitter {
    transport: Arc<dyn Transport>,
    challenge: Option<Arc<dyn ChallengeSource>>,
    config: SubmitConfig,
}

impl Submitter {
    /// Create a submitter without proof-of-work.
    pub fn new(transport: Arc<dyn Transport>, config: SubmitConfig) -> Self {
        Self {
            transport,
            challenge: None,
            config,
        }
    }

    /// Fetch a challenge and attach a proof on every submission.
    pub fn with_challenge_source(mut self, source: Arc<dyn ChallengeSource>) -> Self {
        self.challenge = Some(source);
        self
    }

    /// Whether submissions carry a proof of work.
    pub fn proves_work(&self) -> bool {
        self.challenge.is_some()
    }

    /// Submit an operation, returning the response body unmodified.
    pub async fn submit(&self, operation: &Operation) -> Result<Bytes> {
        let body = operation.to_canonical_bytes()?;
        debug!(kind = %operation.kind(), len = body.len(), "submitting operation");
        self.send(body).await
    }

    /// Submit an untyped operation. Its `type` tag must name one of the
    /// four operations.
    pub async fn submit_value(&self, value: Value) -> Result<Bytes> {
        let operation = Operation::from_value(value)?;
        self.submit(&operation).await
    }

    async fn send(&self, body: Vec<u8>) -> Result<Bytes> {
        let mut request = SubmitRequest::json(body);

        if let Some(source) = &self.challenge {
            let params = source.fetch().await.map_err(SubmitError::ChallengeFetch)?;

            let solver = ChallengeSolver::new(self.config.solver.clone());
            let body = request.body.clone();
            let solution = tokio::task::spawn_blocking(move || solver.solve(&body, &params))
                .await
                .map_err(|e| SubmitError::Worker(e.to_string()))??;

            info!(
                attempts = solution.attempts,
                elapsed = ?solution.elapsed,
                "proof of work attached"
            );
            request = request
                .with_header(headers::CHALLENGE_NONCE, solution.challenge_nonce)
                .with_header(headers::ANSWER_NONCE, solution.answer_nonce);
        }

        self.transport
            .send(request)
            .await
            .map_err(SubmitError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::memory::StaticChallengeSource;
    use crate::transport::memory::RecordingTransport;
    use async_trait::async_trait;
    use serde_json::json;
    use sidetree_client_core::{
        canonicalize_value, CoreError, CreateOperation, Delta, RecoverOperation, SuffixData,
        UpdateOperation,
    };
    use sidetree_client_pow::{ChallengeParameters, PowError};

    const SERVER_NONCE: &str = "0123456789abcdef0123456789abcdef";

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, _request: SubmitRequest) -> anyhow::Result<Bytes> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    struct FailingChallengeSource;

    #[async_trait]
    impl ChallengeSource for FailingChallengeSource {
        async fn fetch(&self) -> anyhow::Result<ChallengeParameters> {
            Err(anyhow::anyhow!("challenge endpoint unreachable"))
        }
    }

    fn create() -> Operation {
        CreateOperation::new(SuffixData::new("h1", "c1"), Delta::new(vec![], "u1")).into()
    }

    fn permissive() -> ChallengeParameters {
        ChallengeParameters::new(SERVER_NONCE, 1, "ff".repeat(33))
    }

    #[tokio::test]
    async fn test_submit_without_challenge() {
        let transport = Arc::new(RecordingTransport::new("accepted"));
        let submitter = Submitter::new(transport.clone(), SubmitConfig::default());
        assert!(!submitter.proves_work());

        let response = submitter.submit(&create()).await.unwrap();
        assert_eq!(response, Bytes::from_static(b"accepted"));

        let request = transport.last_request().await.unwrap();
        assert_eq!(
            request.body,
            Bytes::from_static(
                br#"{"delta":{"patches":[],"updateCommitment":"u1"},"suffixData":{"deltaHash":"h1","recoveryCommitment":"c1"},"type":"create"}"#
            )
        );
        assert_eq!(request.header(headers::CONTENT_TYPE), Some("application/json"));
        assert_eq!(request.header(headers::CHALLENGE_NONCE), None);
        assert_eq!(request.header(headers::ANSWER_NONCE), None);
    }

    #[tokio::test]
    async fn test_submit_with_challenge_attaches_proof() {
        let transport = Arc::new(RecordingTransport::default());
        let source = Arc::new(StaticChallengeSource::new(permissive()));
        let submitter = Submitter::new(transport.clone(), SubmitConfig::default())
            .with_challenge_source(source.clone());

        submitter.submit(&create()).await.unwrap();
        submitter.submit(&create()).await.unwrap();
        assert_eq!(source.fetch_count(), 2);

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.header(headers::CHALLENGE_NONCE), Some(SERVER_NONCE));

        let answer = request.header(headers::ANSWER_NONCE).unwrap();
        assert!(ChallengeSolver::verify(&request.body, &permissive(), answer).unwrap());
    }

    #[tokio::test]
    async fn test_update_and_recover_tags_differ() {
        let transport = Arc::new(RecordingTransport::default());
        let submitter = Submitter::new(transport.clone(), SubmitConfig::default());
        let delta = Delta::new(vec![], "next");

        submitter
            .submit(&UpdateOperation::new("EiAsuffix", "reveal", "jws", delta.clone()).into())
            .await
            .unwrap();
        submitter
            .submit(&RecoverOperation::new("EiAsuffix", "reveal", "jws", delta).into())
            .await
            .unwrap();

        let requests = transport.requests().await;
        let update: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let recover: Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert_eq!(update["type"], "update");
        assert_eq!(recover["type"], "recover");
        assert_eq!(update["didSuffix"], recover["didSuffix"]);
    }

    #[tokio::test]
    async fn test_submit_value_is_canonicalized() {
        let transport = Arc::new(RecordingTransport::default());
        let submitter = Submitter::new(transport.clone(), SubmitConfig::default());

        let value = json!({
            "type": "deactivate",
            "signedData": "jws",
            "revealValue": "reveal",
            "didSuffix": "EiAsuffix"
        });
        submitter.submit_value(value.clone()).await.unwrap();

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.body.to_vec(), canonicalize_value(&value).unwrap());
    }

    #[tokio::test]
    async fn test_unsupported_operation() {
        let transport = Arc::new(RecordingTransport::default());
        let submitter = Submitter::new(transport.clone(), SubmitConfig::default());

        let err = submitter
            .submit_value(json!({"type": "merge", "didSuffix": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Core(CoreError::UnsupportedOperation(_))
        ));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let submitter = Submitter::new(Arc::new(FailingTransport), SubmitConfig::default());

        let err = submitter.submit(&create()).await.unwrap_err();
        match err {
            SubmitError::Transport(inner) => assert!(inner.to_string().contains("connection refused")),
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_challenge_fetch_error() {
        let transport = Arc::new(RecordingTransport::default());
        let submitter = Submitter::new(transport.clone(), SubmitConfig::default())
            .with_challenge_source(Arc::new(FailingChallengeSource));

        let err = submitter.submit(&create()).await.unwrap_err();
        assert!(matches!(err, SubmitError::ChallengeFetch(_)));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_deadline_exceeded_sends_nothing() {
        let transport = Arc::new(RecordingTransport::default());
        let source = Arc::new(StaticChallengeSource::new(ChallengeParameters::new(
            SERVER_NONCE,
            0,
            "00",
        )));
        let submitter = Submitter::new(transport.clone(), SubmitConfig::default())
            .with_challenge_source(source);

        let err = submitter.submit(&create()).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Solver(PowError::DeadlineExceeded { .. })
        ));
        assert!(transport.requests().await.is_empty());
    }
}
