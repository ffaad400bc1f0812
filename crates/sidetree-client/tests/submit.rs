//! End-to-end submission through the client with in-memory collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use sidetree_client::core::CoreError;
use sidetree_client::submit::{headers, RecordingTransport, SubmitError, SubmitRequest};
use sidetree_client::{ChallengeSolver, Client, ClientConfig, ClientError, Transport};
use sidetree_client_testkit::fixtures::{
    impossible_challenge, permissive_challenge, sample_create, sample_deactivate,
    sample_recover, sample_update, TestFixture,
};
use sidetree_client_testkit::ION_LONG_FORM_DID;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

struct RefusingTransport;

#[async_trait]
impl Transport for RefusingTransport {
    async fn send(&self, _request: SubmitRequest) -> anyhow::Result<Bytes> {
        anyhow::bail!("connection refused")
    }
}

#[tokio::test]
async fn test_register_long_form() {
    init_tracing();
    let fixture = TestFixture::new();

    let response = fixture.client.register_long_form(ION_LONG_FORM_DID).await.unwrap();
    assert_eq!(response, Bytes::from_static(br#"{"status":"accepted"}"#));

    let request = fixture.transport.last_request().await.unwrap();
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["type"], "create");
    assert_eq!(
        body["suffixData"]["deltaHash"],
        "EiAtn1cbta_UtVKwippMAbWAAN8U1dXvkUYKgONOE2cVqw"
    );
    assert_eq!(request.header(headers::CHALLENGE_NONCE), None);
}

#[tokio::test]
async fn test_register_forged_long_form_sends_nothing() {
    init_tracing();
    let fixture = TestFixture::new();

    let forged = ION_LONG_FORM_DID.replacen("EiAKkYIJ", "EiAKkYIK", 1);
    let err = fixture.client.register_long_form(&forged).await.unwrap_err();

    assert!(matches!(err, ClientError::Core(CoreError::SuffixMismatch { .. })));
    assert!(fixture.transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_register_with_proof_of_work() {
    init_tracing();
    let fixture = TestFixture::with_challenge(permissive_challenge());

    fixture.client.register_long_form(ION_LONG_FORM_DID).await.unwrap();

    let request = fixture.transport.last_request().await.unwrap();
    let answer = request.header(headers::ANSWER_NONCE).unwrap();
    assert_eq!(
        request.header(headers::CHALLENGE_NONCE),
        Some(permissive_challenge().nonce.as_str())
    );
    assert!(ChallengeSolver::verify(&request.body, &permissive_challenge(), answer).unwrap());
}

#[tokio::test]
async fn test_all_operation_kinds() {
    init_tracing();
    let fixture = TestFixture::new();
    let suffix = sample_create("svc").suffix().unwrap();

    fixture.client.submit(sample_create("svc")).await.unwrap();
    fixture.client.submit(sample_update(suffix.as_str())).await.unwrap();
    fixture.client.submit(sample_recover(suffix.as_str())).await.unwrap();
    fixture.client.submit(sample_deactivate(suffix.as_str())).await.unwrap();

    let kinds: Vec<String> = fixture
        .transport
        .requests()
        .await
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, ["create", "update", "recover", "deactivate"]);
}

#[tokio::test]
async fn test_expired_challenge() {
    init_tracing();
    let fixture = TestFixture::with_challenge(impossible_challenge());

    let err = fixture.client.submit(sample_create("svc")).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Submit(SubmitError::Solver(
            sidetree_client::pow::PowError::DeadlineExceeded { .. }
        ))
    ));
    assert!(fixture.transport.requests().await.is_empty());
}

#[tokio::test]
async fn test_transport_failure_surfaces() {
    init_tracing();
    let client = Client::with_collaborators(
        ClientConfig::new("memory://operations"),
        Arc::new(RefusingTransport),
        None,
    )
    .unwrap();

    let err = client.submit(sample_create("svc")).await.unwrap_err();
    assert!(matches!(err, ClientError::Submit(SubmitError::Transport(_))));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_submit_value_unknown_type() {
    let client = Client::with_collaborators(
        ClientConfig::new("memory://operations"),
        Arc::new(RecordingTransport::default()),
        None,
    )
    .unwrap();

    let err = client
        .submit_value(serde_json::json!({"type": "transfer"}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Submit(SubmitError::Core(CoreError::UnsupportedOperation(_)))
    ));
}
