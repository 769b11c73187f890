//! The geospatial store: the single ownership domain for swap-intent state
//!
//! Every read and write of a [`SwapIntent`] goes through [`SwapStore`]. The
//! trait is the seam for a geo-indexed backend; the shipped [`MemoryStore`]
//! scans with haversine, which is plenty at hyperlocal cardinalities and lets
//! tests inject interleaved writes.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{CoreError, Result};
use crate::geo::GeoPoint;
use crate::id::{SwapId, UserId};
use crate::model::{SwapIntent, UserProfile};

#[async_trait]
pub trait SwapStore: Send + Sync {
    async fn insert_intent(&self, intent: SwapIntent) -> Result<()>;

    async fn intent(&self, id: SwapId) -> Result<Option<SwapIntent>>;

    /// Repoint `matched_with`. Fails with `SwapNotFound` if the intent is gone
    /// (cancelled mid-flight).
    async fn set_matched_with(&self, id: SwapId, peer: Option<SwapId>) -> Result<()>;

    /// Hard-delete. Returns whether the intent existed.
    async fn remove_intent(&self, id: SwapId) -> Result<bool>;

    /// All intents with their great-circle distance from `origin` in
    /// kilometers, nearest first. Filtering is the matcher's job.
    async fn nearest_intents(&self, origin: GeoPoint) -> Result<Vec<(SwapIntent, f64)>>;

    async fn profile(&self, id: UserId) -> Result<Option<UserProfile>>;

    async fn upsert_profile(&self, profile: UserProfile) -> Result<()>;
}

/// Concurrent in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    intents: DashMap<SwapId, SwapIntent>,
    profiles: DashMap<UserId, UserProfile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }
}

#[async_trait]
impl SwapStore for MemoryStore {
    async fn insert_intent(&self, intent: SwapIntent) -> Result<()> {
        self.intents.insert(intent.id, intent);
        Ok(())
    }

    async fn intent(&self, id: SwapId) -> Result<Option<SwapIntent>> {
        Ok(self.intents.get(&id).map(|entry| entry.value().clone()))
    }

    async fn set_matched_with(&self, id: SwapId, peer: Option<SwapId>) -> Result<()> {
        match self.intents.get_mut(&id) {
            Some(mut entry) => {
                entry.matched_with = peer;
                Ok(())
            }
            None => Err(CoreError::swap_not_found(id)),
        }
    }

    async fn remove_intent(&self, id: SwapId) -> Result<bool> {
        Ok(self.intents.remove(&id).is_some())
    }

    async fn nearest_intents(&self, origin: GeoPoint) -> Result<Vec<(SwapIntent, f64)>> {
        let mut ranked: Vec<(SwapIntent, f64)> = self
            .intents
            .iter()
            .map(|entry| {
                let intent = entry.value().clone();
                let distance = origin.distance_km(&intent.location);
                (intent, distance)
            })
            .collect();

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(ranked)
    }

    async fn profile(&self, id: UserId) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(&id).map(|entry| entry.value().clone()))
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<()> {
        self.profiles.insert(profile.id, profile);
        Ok(())
    }
}
