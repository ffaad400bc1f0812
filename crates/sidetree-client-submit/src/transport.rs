//! Transport abstraction for submissions.
//!
//! A transport delivers one request and yields the raw response body.
//! Implementations may use HTTP or anything else; see [`crate::http`].

use async_trait::async_trait;
use bytes::Bytes;

use crate::request::SubmitRequest;

/// Transport trait for delivering operations.
///
/// Implementations must be thread-safe (Send + Sync). Failures are opaque
/// to the submitter and passed through with context.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the response body unmodified.
    async fn send(&self, request: SubmitRequest) -> anyhow::Result<Bytes>;
}

/// A transport that records requests, for testing.
pub mod memory {
    use super::*;
    use tokio::sync::Mutex;

    /// Records every request and replies with a fixed body.
    pub struct RecordingTransport {
        response: Bytes,
        requests: Mutex<Vec<SubmitRequest>>,
    }

    impl RecordingTransport {
        /// Create a transport that answers every request with `response`.
        pub fn new(response: impl Into<Bytes>) -> Self {
            Self {
                response: response.into(),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Requests sent so far, oldest first.
        pub async fn requests(&self) -> Vec<SubmitRequest> {
            self.requests.lock().await.clone()
        }

        /// The most recent request.
        pub async fn last_request(&self) -> Option<SubmitRequest> {
            self.requests.lock().await.last().cloned()
        }
    }

    impl Default for RecordingTransport {
        fn default() -> Self {
            Self::new(Bytes::new())
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: SubmitRequest) -> anyhow::Result<Bytes> {
            self.requests.lock().await.push(request);
            Ok(self.response.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::RecordingTransport;
    use super::*;

    #[tokio::test]
    async fn test_recording_transport() {
        let transport = RecordingTransport::new("ok");
        assert!(transport.last_request().await.is_none());

        let response = transport
            .send(SubmitRequest::json(b"{\"a\":1}".to_vec()))
            .await
            .unwrap();
        assert_eq!(response, Bytes::from_static(b"ok"));

        transport.send(SubmitRequest::json(b"{}".to_vec())).await.unwrap();
        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, Bytes::from_static(b"{\"a\":1}"));
        assert_eq!(transport.last_request().await.unwrap().body, Bytes::from_static(b"{}"));
    }
}
