//! Match Committer: reciprocal pairing with canonical ordering
//!
//! Both participants may try to commit the same pairing concurrently, each
//! believing itself to be the initiator. Canonicalizing the pair gives every
//! caller the same reference frame, and the already-matched short-circuit
//! makes a lost race a safe no-op instead of a conflict. Within one process
//! the commit critical section is serialized by the committer's lock; the
//! short-circuit remains the mitigation for writes racing in from elsewhere.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::id::SwapId;
use crate::store::SwapStore;

/// Result of a commit attempt, as seen by one caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchOutcome {
    /// This call created the pairing
    pub committed: bool,
    /// The pairing (this one or another) already existed; stop polling
    pub already_matched: bool,
}

impl MatchOutcome {
    pub const COMMITTED: Self = Self {
        committed: true,
        already_matched: false,
    };

    pub const ALREADY_MATCHED: Self = Self {
        committed: false,
        already_matched: true,
    };
}

/// Sort a pair of intent ids into their canonical (first, second) roles.
///
/// Every caller of a two-sided commit must agree on which id is primary
/// regardless of call order; the id total order decides.
pub fn canonical_pair(a: SwapId, b: SwapId) -> (SwapId, SwapId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Owns the commit critical section. One instance per service.
#[derive(Debug, Default)]
pub struct MatchCommitter {
    commit_lock: Mutex<()>,
}

impl MatchCommitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to pair two intents.
    ///
    /// Exactly one concurrent caller observes `committed`; later and losing
    /// callers observe `already_matched`, including when one side was paired
    /// with a third intent in the meantime. Fails with `SwapNotFound` if
    /// either side was cancelled mid-flight.
    pub async fn attempt<S: SwapStore + ?Sized>(
        &self,
        store: &S,
        a: SwapId,
        b: SwapId,
    ) -> Result<MatchOutcome> {
        if a == b {
            return Err(CoreError::SamePairing { id: a });
        }

        let (first, second) = canonical_pair(a, b);
        debug!(%first, %second, "commit attempt");

        let _guard = self.commit_lock.lock().await;

        let first_intent = store
            .intent(first)
            .await?
            .ok_or_else(|| CoreError::swap_not_found(first))?;
        let second_intent = store
            .intent(second)
            .await?
            .ok_or_else(|| CoreError::swap_not_found(second))?;

        if first_intent.is_matched() || second_intent.is_matched() {
            debug!(%first, %second, "pairing already resolved");
            return Ok(MatchOutcome::ALREADY_MATCHED);
        }

        // Two separate writes; reciprocal assignments converge even if a
        // remote racer repeats them
        store.set_matched_with(first, Some(second)).await?;
        store.set_matched_with(second, Some(first)).await?;

        info!(%first, %second, "match committed");
        Ok(MatchOutcome::COMMITTED)
    }
}
