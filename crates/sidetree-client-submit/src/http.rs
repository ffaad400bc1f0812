//! HTTP collaborators backed by `reqwest`.

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use sidetree_client_pow::ChallengeParameters;
use tracing::{debug, warn};

use crate::challenge::ChallengeSource;
use crate::request::SubmitRequest;
use crate::transport::Transport;

/// POSTs operations to a node's operations endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// Returns the response body whatever the status code; nodes report
    /// rejections in the body.
    async fn send(&self, request: SubmitRequest) -> anyhow::Result<Bytes> {
        let mut builder = self.client.post(&self.endpoint).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, endpoint = %self.endpoint, "operation endpoint returned an error status");
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("reading response from {}", self.endpoint))?;
        debug!(%status, len = body.len(), "operation response received");
        Ok(body)
    }
}

/// GETs proof-of-work parameters from a node's challenge endpoint.
#[derive(Debug, Clone)]
pub struct HttpChallengeSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChallengeSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChallengeSource for HttpChallengeSource {
    async fn fetch(&self) -> anyhow::Result<ChallengeParameters> {
        let params = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .with_context(|| format!("GET {}", self.endpoint))?
            .error_for_status()?
            .json::<ChallengeParameters>()
            .await
            .context("decoding challenge")?;

        debug!(
            valid_minutes = params.valid_duration_minutes,
            "challenge fetched"
        );
        Ok(params)
    }
}
