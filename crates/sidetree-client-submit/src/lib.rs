//! # Sidetree Client Submit
//!
//! Delivers operations to a Sidetree node.
//!
//! ## Overview
//!
//! A [`Submitter`] serializes an operation to canonical JSON, optionally
//! fetches a challenge and attaches a proof of work, then hands the request
//! to a [`Transport`]. Both collaborators are injected so tests can use the
//! in-memory versions and hosts can swap in their own.
//!
//! ## Request Flow
//!
//! ```text
//! Operation --jcs--> body
//!                     |  ChallengeSource::fetch (optional)
//!                     |  ChallengeSolver::solve on a blocking worker
//!                     |  + Challenge-Nonce, Answer-Nonce
//!                     v
//!              Transport::send --> response bytes
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sidetree_client_submit::{HttpChallengeSource, HttpTransport, SubmitConfig, Submitter};
//!
//! async fn example(op: sidetree_client_core::Operation) -> sidetree_client_submit::Result<()> {
//!     let submitter = Submitter::new(
//!         Arc::new(HttpTransport::new("https://node.example/operations")),
//!         SubmitConfig::default(),
//!     )
//!     .with_challenge_source(Arc::new(HttpChallengeSource::new(
//!         "https://node.example/proof-of-work-challenge",
//!     )));
//!
//!     let response = submitter.submit(&op).await?;
//!     println!("{}", String::from_utf8_lossy(&response));
//!     Ok(())
//! }
//! ```

pub mod challenge;
pub mod error;
pub mod http;
pub mod request;
pub mod submitter;
pub mod transport;

pub use challenge::{memory::StaticChallengeSource, ChallengeSource};
pub use error::{Result, SubmitError};
pub use http::{HttpChallengeSource, HttpTransport};
pub use request::{headers, SubmitRequest};
pub use submitter::{SubmitConfig, Submitter};
pub use transport::{memory::RecordingTransport, Transport};
