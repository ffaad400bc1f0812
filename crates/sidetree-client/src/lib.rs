//! # Sidetree Client
//!
//! A client for Sidetree-based DID methods such as ION.
//!
//! ## Overview
//!
//! - **Operations**: Create, Update, Recover and Deactivate, serialized as
//!   canonical JSON
//! - **Long-form DIDs**: self-certifying identifiers that embed their create
//!   payload and are verified on parse
//! - **Proof of work**: optional Argon2id challenge solving before submission
//! - **Submission**: injected transport and challenge source, HTTP by default
//!
//! ## Key Concepts
//!
//! - **Suffix**: `base64url(multihash(sha256(jcs(suffixData))))`, the part of
//!   a DID that commits to its initial state
//! - **Short form**: `did:<method>:<suffix>`
//! - **Long form**: `did:<method>:<suffix>:<base64url(jcs({delta, suffixData}))>`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sidetree_client::{Client, ClientConfig};
//!
//! async fn example(long_form: &str) -> sidetree_client::Result<()> {
//!     let client = Client::new(
//!         ClientConfig::new("https://node.example/api/v1.0/operations")
//!             .with_challenge_endpoint("https://node.example/api/v1.0/proof-of-work-challenge"),
//!     )?;
//!
//!     let response = client.register_long_form(long_form).await?;
//!     println!("{}", String::from_utf8_lossy(&response));
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `sidetree_client::core` - Canonical JSON, hashing, operations, long-form codec
//! - `sidetree_client::pow` - Proof-of-work challenge solver
//! - `sidetree_client::submit` - Submitter, transports and challenge sources

pub mod client;
pub mod error;

// Re-export component crates
pub use sidetree_client_core as core;
pub use sidetree_client_pow as pow;
pub use sidetree_client_submit as submit;

// Re-export main types for convenience
pub use client::{Client, ClientConfig, DEFAULT_METHOD};
pub use error::{ClientError, Result};

// Re-export commonly used types
pub use sidetree_client_core::{
    parse_long_form, CreateOperation, DeactivateOperation, Delta, DidSuffix, LongFormDid,
    Operation, OperationKind, Patch, RecoverOperation, SuffixData, UpdateOperation,
};
pub use sidetree_client_pow::{ChallengeParameters, ChallengeSolver, Solution, SolverConfig};
pub use sidetree_client_submit::{ChallengeSource, SubmitRequest, Transport};
