//! Match Finder: ranked compatible candidates for a swap intent
//!
//! Runs a nearest-first scan from the intent's own location, filters to
//! compatible unmatched counterparties, and orders by cheapest sufficient
//! amount, nearest among ties.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::id::{SwapId, UserId};
use crate::model::{SwapIntent, UserProfile};
use crate::store::SwapStore;

/// A compatible counterparty intent, with its owner and distance from the
/// requesting intent in kilometers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    pub intent: SwapIntent,
    pub owner: UserProfile,
    pub distance_km: f64,
}

/// Ranked candidate search.
///
/// A candidate qualifies when it is a different intent owned by a different
/// user, offers the complementary settlement kind, covers at least the
/// requester's amount, and is not already paired. Results sort by
/// `(amount asc, distance asc)` and truncate to `limit` (`None` = unlimited).
/// An empty result is not an error.
pub async fn find_candidates<S: SwapStore + ?Sized>(
    store: &S,
    swap_id: SwapId,
    requester: UserId,
    limit: Option<usize>,
) -> Result<Vec<Candidate>> {
    let intent = store
        .intent(swap_id)
        .await?
        .ok_or_else(|| CoreError::swap_not_found(swap_id))?;

    if intent.owner != requester {
        return Err(CoreError::not_swap_owner(swap_id, requester));
    }

    let owner = store
        .profile(intent.owner)
        .await?
        .ok_or_else(|| CoreError::user_not_found(intent.owner))?;
    if !owner.has_usable_location() {
        return Err(CoreError::location_required(intent.owner));
    }

    let wanted_kind = intent.kind.complement();
    let mut candidates = Vec::new();

    for (other, distance_km) in store.nearest_intents(intent.location).await? {
        if other.id == intent.id
            || other.owner == intent.owner
            || other.kind != wanted_kind
            || other.amount < intent.amount
            || other.is_matched()
        {
            continue;
        }

        // Counterparties without a profile are unmatchable; drop them the way
        // the lookup join would
        let Some(candidate_owner) = store.profile(other.owner).await? else {
            continue;
        };

        candidates.push(Candidate {
            intent: other,
            owner: candidate_owner,
            distance_km,
        });
    }

    // The scan is already nearest-first; amount takes precedence, distance
    // breaks ties
    candidates.sort_by(|a, b| {
        a.intent
            .amount
            .cmp(&b.intent.amount)
            .then(a.distance_km.total_cmp(&b.distance_km))
    });

    if let Some(limit) = limit {
        candidates.truncate(limit);
    }

    debug!(
        swap = %swap_id,
        count = candidates.len(),
        "candidate search complete"
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::model::SettlementKind;
    use crate::store::MemoryStore;

    async fn seed_user(store: &MemoryStore, name: &str, lng: f64, lat: f64) -> UserId {
        let id = UserId::generate();
        store
            .upsert_profile(UserProfile {
                id,
                name: name.to_string(),
                location: "Mumbai".to_string(),
                coordinates: GeoPoint::new(lng, lat),
            })
            .await
            .unwrap();
        id
    }

    async fn seed_intent(
        store: &MemoryStore,
        owner: UserId,
        kind: SettlementKind,
        amount: u64,
        lng: f64,
        lat: f64,
    ) -> SwapId {
        let intent = SwapIntent::new(owner, kind, amount, GeoPoint::new(lng, lat));
        let id = intent.id;
        store.insert_intent(intent).await.unwrap();
        id
    }

    #[tokio::test]
    async fn filters_and_orders_by_amount_then_distance() {
        let store = MemoryStore::new();
        let requester = seed_user(&store, "A", 72.8, 19.0).await;
        let swap = seed_intent(&store, requester, SettlementKind::Cash, 100, 72.8, 19.0).await;

        // B: amount too low; C: wrong kind; D and E qualify at equal amount,
        // E is nearer
        let b = seed_user(&store, "B", 72.8, 19.0).await;
        seed_intent(&store, b, SettlementKind::Online, 50, 72.8, 19.0).await;
        let c = seed_user(&store, "C", 72.8, 19.0).await;
        seed_intent(&store, c, SettlementKind::Cash, 200, 72.8, 19.0).await;
        let d = seed_user(&store, "D", 72.82, 19.02).await;
        let d_swap = seed_intent(&store, d, SettlementKind::Online, 150, 72.82, 19.02).await;
        let e = seed_user(&store, "E", 72.805, 19.005).await;
        let e_swap = seed_intent(&store, e, SettlementKind::Online, 150, 72.805, 19.005).await;

        let found = find_candidates(&store, swap, requester, None).await.unwrap();
        let ids: Vec<SwapId> = found.iter().map(|c| c.intent.id).collect();
        assert_eq!(ids, vec![e_swap, d_swap]);
    }

    #[tokio::test]
    async fn cheaper_sufficient_amount_beats_nearer_expensive_one() {
        let store = MemoryStore::new();
        let requester = seed_user(&store, "A", 72.8, 19.0).await;
        let swap = seed_intent(&store, requester, SettlementKind::Cash, 100, 72.8, 19.0).await;

        let near = seed_user(&store, "near", 72.801, 19.001).await;
        seed_intent(&store, near, SettlementKind::Online, 500, 72.801, 19.001).await;
        let far = seed_user(&store, "far", 72.9, 19.1).await;
        let far_swap = seed_intent(&store, far, SettlementKind::Online, 150, 72.9, 19.1).await;

        let found = find_candidates(&store, swap, requester, Some(1)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].intent.id, far_swap);
    }

    #[tokio::test]
    async fn excludes_self_and_own_user_intents() {
        let store = MemoryStore::new();
        let requester = seed_user(&store, "A", 72.8, 19.0).await;
        let swap = seed_intent(&store, requester, SettlementKind::Cash, 100, 72.8, 19.0).await;
        // A second intent by the same user, otherwise a perfect counterpart
        seed_intent(&store, requester, SettlementKind::Online, 150, 72.8, 19.0).await;

        let found = find_candidates(&store, swap, requester, None).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn excludes_already_matched_candidates() {
        let store = MemoryStore::new();
        let requester = seed_user(&store, "A", 72.8, 19.0).await;
        let swap = seed_intent(&store, requester, SettlementKind::Cash, 100, 72.8, 19.0).await;

        let other = seed_user(&store, "B", 72.81, 19.01).await;
        let other_swap = seed_intent(&store, other, SettlementKind::Online, 150, 72.81, 19.01).await;
        store
            .set_matched_with(other_swap, Some(SwapId::generate()))
            .await
            .unwrap();

        let found = find_candidates(&store, swap, requester, None).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn requires_owner() {
        let store = MemoryStore::new();
        let owner = seed_user(&store, "A", 72.8, 19.0).await;
        let swap = seed_intent(&store, owner, SettlementKind::Cash, 100, 72.8, 19.0).await;

        let stranger = UserId::generate();
        let err = find_candidates(&store, swap, stranger, None).await.unwrap_err();
        assert!(matches!(err, CoreError::NotSwapOwner { .. }));
    }

    #[tokio::test]
    async fn requires_usable_location() {
        let store = MemoryStore::new();
        let owner = UserId::generate();
        store
            .upsert_profile(UserProfile {
                id: owner,
                name: "A".into(),
                location: "Mumbai".into(),
                coordinates: GeoPoint::new(0.0, 0.0),
            })
            .await
            .unwrap();
        let swap = seed_intent(&store, owner, SettlementKind::Cash, 100, 0.0, 0.0).await;

        let err = find_candidates(&store, swap, owner, None).await.unwrap_err();
        assert!(matches!(err, CoreError::LocationRequired { .. }));
    }
}
