//! Deadline-bounded proof-of-work search.
//!
//! The search generates candidate nonces until the hex text of a work digest
//! sorts below the hex text of the target. The comparison is on strings, not
//! numbers: a target longer than 64 hex characters accepts more digests than
//! its numeric value would suggest, and servers rely on that exact rule.

use rand::Rng;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::{PowError, Result};
use crate::nonce::{generate_nonce, nonce_bytes};
use crate::params::ChallengeParameters;
use crate::work::WorkFunction;

/// Configuration for the solver.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverConfig {
    /// Stop after this many attempts even if the deadline has not passed.
    pub max_attempts: Option<u64>,
}

/// An accepted answer to a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The server nonce, echoed back as the `Challenge-Nonce` header.
    pub challenge_nonce: String,
    /// The accepted client nonce text, sent as the `Answer-Nonce` header.
    pub answer_nonce: String,
    /// Candidates tried, including the accepted one.
    pub attempts: u64,
    /// Time spent searching.
    pub elapsed: Duration,
}

/// Where the search stands after one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Searching,
    Solved,
    DeadlineExceeded,
}

impl SearchState {
    /// Classify one candidate.
    ///
    /// Accepting requires both a small enough digest and time remaining. The
    /// search only gives up once elapsed time is strictly past the deadline.
    pub fn after_attempt(
        target_hex: &str,
        work_hex: &str,
        elapsed: Duration,
        deadline: Duration,
    ) -> Self {
        if target_hex > work_hex && elapsed < deadline {
            Self::Solved
        } else if elapsed > deadline {
            Self::DeadlineExceeded
        } else {
            Self::Searching
        }
    }
}

/// Solves challenges for request bodies.
#[derive(Debug, Clone, Default)]
pub struct ChallengeSolver {
    config: SolverConfig,
}

impl ChallengeSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Search for a nonce using the thread-local RNG.
    ///
    /// Blocks the calling thread for up to the challenge's validity window.
    pub fn solve(&self, request: &[u8], params: &ChallengeParameters) -> Result<Solution> {
        self.solve_with_rng(request, params, &mut rand::thread_rng())
    }

    /// Search for a nonce with a caller-supplied RNG.
    pub fn solve_with_rng<R: Rng>(
        &self,
        request: &[u8],
        params: &ChallengeParameters,
        rng: &mut R,
    ) -> Result<Solution> {
        let challenge = params.decode()?;
        let work = WorkFunction::new()?;
        let start = Instant::now();
        let mut attempts = 0u64;

        loop {
            attempts += 1;
            let nonce = generate_nonce(rng);
            let digest = work.compute(&nonce_bytes(&nonce)?, request, &challenge.salt)?;
            let work_hex = hex::encode(digest);
            let elapsed = start.elapsed();

            match SearchState::after_attempt(
                &challenge.target_hex,
                &work_hex,
                elapsed,
                challenge.deadline,
            ) {
                SearchState::Solved => {
                    debug!(attempts, ?elapsed, "challenge solved");
                    return Ok(Solution {
                        challenge_nonce: params.nonce.clone(),
                        answer_nonce: nonce,
                        attempts,
                        elapsed,
                    });
                }
                SearchState::DeadlineExceeded => {
                    debug!(attempts, ?elapsed, "challenge deadline exceeded");
                    return Err(PowError::DeadlineExceeded { attempts, elapsed });
                }
                SearchState::Searching => {
                    trace!(attempts, work = %work_hex, "candidate rejected");
                }
            }

            if let Some(max) = self.config.max_attempts {
                if attempts >= max {
                    return Err(PowError::AttemptsExhausted { attempts });
                }
            }
        }
    }

    /// Check an answer the way a server would, ignoring the deadline.
    pub fn verify(
        request: &[u8],
        params: &ChallengeParameters,
        answer_nonce: &str,
    ) -> Result<bool> {
        let challenge = params.decode()?;
        let raw = nonce_bytes(answer_nonce)?;
        let digest = WorkFunction::new()?.compute(&raw, request, &challenge.salt)?;
        Ok(challenge.target_hex > hex::encode(digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SERVER_NONCE: &str = "0123456789abcdef0123456789abcdef";

    /// 66 hex characters of `f` sort above every 64-character digest.
    fn permissive_target() -> String {
        "ff".repeat(33)
    }

    #[test]
    fn test_permissive_target_solves_immediately() {
        let params = ChallengeParameters::new(SERVER_NONCE, 1, permissive_target());
        let solver = ChallengeSolver::default();

        let solution = solver.solve(b"{\"type\":\"create\"}", &params).unwrap();
        assert_eq!(solution.attempts, 1);
        assert_eq!(solution.challenge_nonce, SERVER_NONCE);
        assert!(solution.answer_nonce.len() <= 1000);
    }

    #[test]
    fn test_impossible_target_with_zero_deadline() {
        for target in ["", "00"] {
            let params = ChallengeParameters::new(SERVER_NONCE, 0, target);
            let err = ChallengeSolver::default()
                .solve(b"request", &params)
                .unwrap_err();
            assert!(
                matches!(err, PowError::DeadlineExceeded { attempts: 1, .. }),
                "target {:?}: {:?}",
                target,
                err
            );
        }
    }

    #[test]
    fn test_attempt_cap() {
        let params = ChallengeParameters::new(SERVER_NONCE, 1, "00");
        let solver = ChallengeSolver::new(SolverConfig {
            max_attempts: Some(3),
        });

        let err = solver.solve(b"request", &params).unwrap_err();
        assert!(matches!(err, PowError::AttemptsExhausted { attempts: 3 }));
    }

    #[test]
    fn test_solution_verifies() {
        let params = ChallengeParameters::new(SERVER_NONCE, 1, permissive_target());
        let mut rng = StdRng::seed_from_u64(1);
        let solution = ChallengeSolver::default()
            .solve_with_rng(b"request", &params, &mut rng)
            .unwrap();

        assert!(ChallengeSolver::verify(b"request", &params, &solution.answer_nonce).unwrap());

        let strict = ChallengeParameters::new(SERVER_NONCE, 1, "00");
        assert!(!ChallengeSolver::verify(b"request", &strict, &solution.answer_nonce).unwrap());
    }

    #[test]
    fn test_invalid_challenge_fails_before_searching() {
        let params = ChallengeParameters::new("not hex", 1, permissive_target());
        assert!(matches!(
            ChallengeSolver::default().solve(b"request", &params),
            Err(PowError::InvalidChallenge(_))
        ));
    }

    #[test]
    fn test_search_state_string_comparison() {
        let minute = Duration::from_secs(60);
        let early = Duration::from_secs(1);

        // "9" > "10" as text even though 9 < 0x10 numerically.
        assert_eq!(
            SearchState::after_attempt("9", "10", early, minute),
            SearchState::Solved
        );
        assert_eq!(
            SearchState::after_attempt("10", "9f", early, minute),
            SearchState::Searching
        );
        assert_eq!(
            SearchState::after_attempt("ab", "ab", early, minute),
            SearchState::Searching
        );
    }

    #[test]
    fn test_search_state_deadline() {
        let minute = Duration::from_secs(60);

        // A winning digest found after the deadline does not count.
        assert_eq!(
            SearchState::after_attempt("ff", "00", minute + Duration::from_millis(1), minute),
            SearchState::DeadlineExceeded
        );
        // Exactly at the deadline neither accepts nor gives up.
        assert_eq!(
            SearchState::after_attempt("ff", "00", minute, minute),
            SearchState::Searching
        );
    }
}
