//! Challenge sources.
//!
//! A challenge source yields fresh proof-of-work parameters for each
//! submission. Nothing here caches parameters.

use async_trait::async_trait;
use sidetree_client_pow::ChallengeParameters;

/// Fetches proof-of-work parameters.
#[async_trait]
pub trait ChallengeSource: Send + Sync {
    /// Fetch parameters for one submission.
    async fn fetch(&self) -> anyhow::Result<ChallengeParameters>;
}

/// A challenge source returning fixed parameters, for testing.
pub mod memory {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct StaticChallengeSource {
        params: ChallengeParameters,
        fetches: AtomicUsize,
    }

    impl StaticChallengeSource {
        pub fn new(params: ChallengeParameters) -> Self {
            Self {
                params,
                fetches: AtomicUsize::new(0),
            }
        }

        /// How many times parameters were fetched.
        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChallengeSource for StaticChallengeSource {
        async fn fetch(&self) -> anyhow::Result<ChallengeParameters> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.params.clone())
        }
    }
}
