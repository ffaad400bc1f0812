//! # Sidetree Client Core
//!
//! Pure primitives for building Sidetree operations: canonical JSON,
//! content hashing, the four operation variants, and the long-form DID codec.
//!
//! This crate contains no I/O and no networking. It is pure computation over
//! JSON values and hashes.
//!
//! ## Key Types
//!
//! - [`CreateOperation`] - Creates a DID whose suffix is the hash of its [`SuffixData`]
//! - [`UpdateOperation`], [`RecoverOperation`], [`DeactivateOperation`] - Address an existing DID
//! - [`Operation`] - The `type`-tagged union of all four
//! - [`DidSuffix`] - Content-addressed identifier fragment
//! - [`LongFormDid`] - A verified self-certifying DID
//!
//! ## Canonicalization
//!
//! All hashes are taken over RFC 8785 canonical JSON. See [`canonical`] module.
//!
//! ## Example
//!
//! ```rust
//! use sidetree_client_core::{parse_long_form, CreateOperation, Delta, SuffixData};
//!
//! let create = CreateOperation::new(
//!     SuffixData::new("h1", "c1"),
//!     Delta::new(vec![], "u1"),
//! );
//! let uri = create.long_form_uri("ion").unwrap();
//! let (suffix_data, delta) = parse_long_form(&uri).unwrap();
//! assert_eq!(suffix_data, create.suffix_data);
//! assert_eq!(delta, create.delta);
//! ```

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod long_form;
pub mod operation;
pub mod types;

pub use canonical::{canonicalize, canonicalize_str, canonicalize_value};
pub use crypto::{content_hash, decode_base64url, encode_base64url, Multihash, Sha256Hash};
pub use error::{CoreError, Result};
pub use long_form::{encode_payload, parse_long_form, LongFormDid};
pub use operation::{
    CreateOperation, DeactivateOperation, Delta, Operation, OperationKind, Patch,
    RecoverOperation, SuffixData, UpdateOperation,
};
pub use types::DidSuffix;
