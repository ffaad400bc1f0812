//! The Client: one node, one DID method.
//!
//! Binds a method name and a node's endpoints to the operation model and
//! the submission flow.

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use sidetree_client_core::{CreateOperation, LongFormDid, Operation};
use sidetree_client_pow::SolverConfig;
use sidetree_client_submit::{
    ChallengeSource, HttpChallengeSource, HttpTransport, SubmitConfig, Submitter, Transport,
};
use tracing::info;

use crate::error::{ClientError, Result};

/// Default DID method.
pub const DEFAULT_METHOD: &str = "ion";

/// Configuration for the Client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// DID method used when rendering identifiers.
    pub method: String,
    /// Where operations are POSTed. Required.
    pub operations_endpoint: String,
    /// Where proof-of-work challenges are fetched. No proof is sent when unset.
    pub challenge_endpoint: Option<String>,
    /// Solver settings.
    pub solver: SolverConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            operations_endpoint: String::new(),
            challenge_endpoint: None,
            solver: SolverConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Config for an operations endpoint with default settings.
    pub fn new(operations_endpoint: impl Into<String>) -> Self {
        Self {
            operations_endpoint: operations_endpoint.into(),
            ..Self::default()
        }
    }

    /// Require proof-of-work from the given challenge endpoint.
    pub fn with_challenge_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.challenge_endpoint = Some(endpoint.into());
        self
    }

    /// Use a DID method other than `ion`.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.operations_endpoint.trim().is_empty() {
            return Err(ClientError::InvalidConfig("invalid endpoint".into()));
        }
        if matches!(&self.challenge_endpoint, Some(e) if e.trim().is_empty()) {
            return Err(ClientError::InvalidConfig("invalid challenge endpoint".into()));
        }
        if self.method.is_empty() {
            return Err(ClientError::InvalidConfig("empty DID method".into()));
        }
        Ok(())
    }
}

/// A client for one Sidetree node.
pub struct Client {
    config: ClientConfig,
    submitter: Submitter,
}

impl Client {
    /// Create a client talking HTTP to the configured endpoints.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config.operations_endpoint.clone()));
        let challenge = config
            .challenge_endpoint
            .clone()
            .map(|e| Arc::new(HttpChallengeSource::new(e)) as Arc<dyn ChallengeSource>);

        Self::with_collaborators(config, transport, challenge)
    }

    /// Create a client with caller-supplied collaborators.
    ///
    /// The endpoints in `config` are validated but not used.
    pub fn with_collaborators(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        challenge: Option<Arc<dyn ChallengeSource>>,
    ) -> Result<Self> {
        config.validate()?;

        let submit_config = SubmitConfig {
            solver: config.solver.clone(),
        };
        let mut submitter = Submitter::new(transport, submit_config);
        if let Some(source) = challenge {
            submitter = submitter.with_challenge_source(source);
        }

        Ok(Self { config, submitter })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether submissions carry a proof of work.
    pub fn proves_work(&self) -> bool {
        self.submitter.proves_work()
    }

    /// Submit an operation and return the node's response body.
    pub async fn submit(&self, operation: impl Into<Operation>) -> Result<Bytes> {
        let operation = operation.into();
        Ok(self.submitter.submit(&operation).await?)
    }

    /// Submit an untyped JSON operation.
    pub async fn submit_value(&self, value: Value) -> Result<Bytes> {
        Ok(self.submitter.submit_value(value).await?)
    }

    /// Anchor a DID from its long form.
    ///
    /// The identifier is verified before anything is sent.
    pub async fn register_long_form(&self, uri: &str) -> Result<Bytes> {
        let did = LongFormDid::parse(uri)?;
        info!(suffix = %did.suffix, "registering long-form DID");
        self.submit(did.to_create()).await
    }

    /// `did:<method>:<suffix>` for a create operation.
    pub fn short_form_uri(&self, create: &CreateOperation) -> Result<String> {
        Ok(create.short_form_uri(&self.config.method)?)
    }

    /// `did:<method>:<suffix>:<payload>` for a create operation.
    pub fn long_form_uri(&self, create: &CreateOperation) -> Result<String> {
        Ok(create.long_form_uri(&self.config.method)?)
    }
}
