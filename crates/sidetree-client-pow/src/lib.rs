//! # Sidetree Client PoW
//!
//! Proof-of-work challenge solving for operation submission.
//!
//! ## Overview
//!
//! Some Sidetree nodes require each submission to carry an answer to a
//! server-issued challenge. The client searches for a nonce whose Argon2id
//! digest, keyed by the server nonce and bound to the exact request bytes,
//! sorts below the server's target.
//!
//! ## Key Concepts
//!
//! - **Challenge**: `(nonce, validDurationInMinutes, largestAllowedHash)` from the server
//! - **Answer nonce**: double hex-encoded random bytes
//! - **Work**: `Argon2id(rawNonce || request, salt = challengeNonce)`
//! - **Acceptance**: `hex(target) > hex(work)` compared as text, before the deadline
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sidetree_client_pow::{ChallengeParameters, ChallengeSolver};
//!
//! let params = ChallengeParameters::new("0123456789abcdef", 10, "0fff");
//! let solution = ChallengeSolver::default().solve(b"{...}", &params)?;
//! println!("Answer-Nonce: {}", solution.answer_nonce);
//! # Ok::<(), sidetree_client_pow::PowError>(())
//! ```

pub mod error;
pub mod nonce;
pub mod params;
pub mod solver;
pub mod work;

pub use error::{PowError, Result};
pub use nonce::generate_nonce;
pub use params::ChallengeParameters;
pub use solver::{ChallengeSolver, SearchState, Solution, SolverConfig};
