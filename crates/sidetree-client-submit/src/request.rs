//! The outbound request handed to a transport.

use bytes::Bytes;

/// Header names used on submissions.
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CHALLENGE_NONCE: &str = "Challenge-Nonce";
    pub const ANSWER_NONCE: &str = "Answer-Nonce";

    pub const APPLICATION_JSON: &str = "application/json";
}

/// Serialized operation bytes plus request properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub body: Bytes,
    pub headers: Vec<(String, String)>,
}

impl SubmitRequest {
    /// A JSON request with only `Content-Type` set.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            headers: vec![(
                headers::CONTENT_TYPE.to_string(),
                headers::APPLICATION_JSON.to_string(),
            )],
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_request() {
        let req = SubmitRequest::json(b"{}".to_vec());
        assert_eq!(req.body, Bytes::from_static(b"{}"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header(headers::ANSWER_NONCE), None);
    }

    #[test]
    fn test_with_header() {
        let req = SubmitRequest::json(Bytes::new()).with_header(headers::CHALLENGE_NONCE, "abcd");
        assert_eq!(req.header("challenge-nonce"), Some("abcd"));
        assert_eq!(req.headers.len(), 2);
    }
}
