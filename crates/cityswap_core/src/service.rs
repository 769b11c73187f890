//! Swap Intent Lifecycle Manager
//!
//! One `SwapService` owns all reads and writes of swap-intent state: intent
//! creation and cancellation, owner-gated reads, candidate search, and the
//! commit path. Matching is pull-based; there is no background scheduler, so
//! the service stays stateless between calls apart from the store itself.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::committer::{MatchCommitter, MatchOutcome};
use crate::error::{CoreError, Result};
use crate::id::{SwapId, UserId};
use crate::matcher::{self, Candidate};
use crate::model::{SettlementKind, SwapIntent, UserProfile};
use crate::store::SwapStore;

/// The peer side of a committed pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchedPeer {
    pub intent: SwapIntent,
    pub owner: UserProfile,
}

/// What a polling client sees: either the committed peer, or the current best
/// candidate to attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchStatus {
    pub matched: Option<MatchedPeer>,
    pub candidates: Vec<Candidate>,
}

pub struct SwapService<S> {
    store: S,
    committer: MatchCommitter,
}

impl<S: SwapStore> SwapService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            committer: MatchCommitter::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an intent for `owner`, snapshotting the profile coordinates.
    ///
    /// The owner must already have a usable location; the amount must be
    /// positive. Multiple live intents per user are allowed.
    pub async fn create(
        &self,
        owner: UserId,
        kind: SettlementKind,
        amount: u64,
    ) -> Result<SwapIntent> {
        if amount == 0 {
            return Err(CoreError::InvalidAmount { amount });
        }

        let profile = self
            .store
            .profile(owner)
            .await?
            .ok_or_else(|| CoreError::user_not_found(owner))?;
        if !profile.has_usable_location() {
            return Err(CoreError::location_required(owner));
        }

        let intent = SwapIntent::new(owner, kind, amount, profile.coordinates);
        self.store.insert_intent(intent.clone()).await?;

        info!(swap = %intent.id, %owner, %kind, amount, "swap intent created");
        Ok(intent)
    }

    /// Owner-gated read of a single intent
    pub async fn fetch(&self, swap: SwapId, requester: UserId) -> Result<SwapIntent> {
        let intent = self.owned_intent(swap, requester).await?;
        Ok(intent)
    }

    /// Cancel an intent, un-pairing the peer first if one exists.
    ///
    /// The peer discovers it is unmatched again on its next poll tick; there
    /// is no push notification. The two writes are not atomic (accepted).
    pub async fn cancel(&self, swap: SwapId, requester: UserId) -> Result<()> {
        let intent = self.owned_intent(swap, requester).await?;

        if let Some(peer) = intent.matched_with {
            match self.store.set_matched_with(peer, None).await {
                Ok(()) | Err(CoreError::SwapNotFound { .. }) => {}
                Err(other) => return Err(other),
            }
        }

        self.store.remove_intent(swap).await?;
        info!(%swap, peer = ?intent.matched_with, "swap intent cancelled");
        Ok(())
    }

    /// Exploratory "show nearby" listing: every qualifying candidate, ranked
    pub async fn candidates(&self, swap: SwapId, requester: UserId) -> Result<Vec<Candidate>> {
        matcher::find_candidates(&self.store, swap, requester, None).await
    }

    /// One poll step's worth of state: the committed peer if the pairing
    /// landed (from either side), otherwise the single best candidate.
    pub async fn status(&self, swap: SwapId, requester: UserId) -> Result<MatchStatus> {
        let intent = self.owned_intent(swap, requester).await?;

        let profile = self
            .store
            .profile(intent.owner)
            .await?
            .ok_or_else(|| CoreError::user_not_found(intent.owner))?;
        if !profile.has_usable_location() {
            return Err(CoreError::location_required(intent.owner));
        }

        if let Some(peer_id) = intent.matched_with {
            // A dangling pointer (peer cancelled between its two writes) shows
            // up as no peer; the client keeps seeing an empty status
            let matched = match self.store.intent(peer_id).await? {
                Some(peer) => {
                    let owner = self
                        .store
                        .profile(peer.owner)
                        .await?
                        .ok_or_else(|| CoreError::user_not_found(peer.owner))?;
                    Some(MatchedPeer {
                        intent: peer,
                        owner,
                    })
                }
                None => None,
            };
            return Ok(MatchStatus {
                matched,
                candidates: Vec::new(),
            });
        }

        let candidates = matcher::find_candidates(&self.store, swap, requester, Some(1)).await?;
        Ok(MatchStatus {
            matched: None,
            candidates,
        })
    }

    /// Commit a pairing between two intents; either side may call this
    pub async fn attempt_match(&self, a: SwapId, b: SwapId) -> Result<MatchOutcome> {
        self.committer.attempt(&self.store, a, b).await
    }

    /// Upsert the collaborator profile data the matcher reads
    pub async fn set_profile(&self, profile: UserProfile) -> Result<UserProfile> {
        if !profile.coordinates.is_valid() {
            return Err(CoreError::InvalidCoordinates {
                longitude: profile.coordinates.longitude,
                latitude: profile.coordinates.latitude,
            });
        }
        self.store.upsert_profile(profile.clone()).await?;
        Ok(profile)
    }

    async fn owned_intent(&self, swap: SwapId, requester: UserId) -> Result<SwapIntent> {
        let intent = self
            .store
            .intent(swap)
            .await?
            .ok_or_else(|| CoreError::swap_not_found(swap))?;
        if intent.owner != requester {
            return Err(CoreError::not_swap_owner(swap, requester));
        }
        Ok(intent)
    }
}
