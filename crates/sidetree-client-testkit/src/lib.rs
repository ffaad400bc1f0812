//! # Sidetree Client Testkit
//!
//! Testing utilities for the Sidetree client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known long-form DIDs with expected suffixes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Sample operations and a client on in-memory collaborators
//!
//! ## Golden Vectors
//!
//! ```rust
//! use sidetree_client_testkit::vectors::{all_vectors, create_from_vector};
//!
//! for vector in all_vectors() {
//!     let create = create_from_vector(&vector);
//!     assert_eq!(create.suffix().unwrap(), vector.expected_suffix);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use sidetree_client_testkit::generators::{create_from_params, CreateParams};
//!
//! proptest! {
//!     #[test]
//!     fn suffix_is_deterministic(params: CreateParams) {
//!         let a = create_from_params(&params);
//!         let b = create_from_params(&params);
//!         prop_assert_eq!(a.suffix().unwrap(), b.suffix().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use sidetree_client_testkit::fixtures::{permissive_challenge, TestFixture};
//!
//! let fixture = TestFixture::with_challenge(permissive_challenge());
//! assert!(fixture.client.proves_work());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{impossible_challenge, permissive_challenge, TestFixture};
pub use generators::{create_from_params, CreateParams};
pub use vectors::{all_vectors, create_from_vector, verify_all_vectors, GoldenVector, ION_LONG_FORM_DID};
