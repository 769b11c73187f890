//! Domain entities: swap intents and the profile data the matcher reads
//!
//! A swap intent is a standing offer to exchange a declared amount of one
//! settlement kind for the other. `amount` and `kind` never change after
//! creation; `matched_with` only moves `None -> Some` (commit) or
//! `Some -> None` (peer cancelled).

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::id::{SwapId, UserId};

/// The two mutually-complementary categories an intent can offer.
///
/// This is a barter: one side's cash for the other's online payment. No money
/// moves through the system; the kinds are self-declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SettlementKind {
    Cash,
    Online,
}

impl SettlementKind {
    /// The kind a compatible counterparty must be offering
    pub fn complement(self) -> Self {
        match self {
            SettlementKind::Cash => SettlementKind::Online,
            SettlementKind::Online => SettlementKind::Cash,
        }
    }
}

impl std::fmt::Display for SettlementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettlementKind::Cash => write!(f, "cash"),
            SettlementKind::Online => write!(f, "online"),
        }
    }
}

/// A user's standing swap offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwapIntent {
    pub id: SwapId,
    /// The creating user; immutable after creation
    pub owner: UserId,
    /// What the owner is offering (they want the complement in return)
    pub kind: SettlementKind,
    /// The owner's stated amount; immutable after creation
    pub amount: u64,
    /// Snapshot of the owner's coordinates at creation time, not a live
    /// reference; re-running the flow creates a new intent
    pub location: GeoPoint,
    /// Reciprocal pairing pointer; `None` while unmatched
    pub matched_with: Option<SwapId>,
    pub created_at: DateTime<Utc>,
}

impl SwapIntent {
    pub fn new(owner: UserId, kind: SettlementKind, amount: u64, location: GeoPoint) -> Self {
        Self {
            id: SwapId::generate(),
            owner,
            kind,
            amount,
            location,
            matched_with: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched_with.is_some()
    }
}

/// Profile data the matcher consumes, owned by the user service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    /// Display string ("Andheri West, Mumbai"); blank until the user sets it
    pub location: String,
    pub coordinates: GeoPoint,
}

impl UserProfile {
    /// Whether the profile satisfies the matching precondition: a non-blank
    /// location string and coordinates that are not the (0, 0) sentinel.
    pub fn has_usable_location(&self) -> bool {
        !self.location.trim().is_empty() && !self.coordinates.is_origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_complement_each_other() {
        assert_eq!(SettlementKind::Cash.complement(), SettlementKind::Online);
        assert_eq!(SettlementKind::Online.complement(), SettlementKind::Cash);
    }

    #[test]
    fn new_intent_starts_unmatched() {
        let intent = SwapIntent::new(
            UserId::generate(),
            SettlementKind::Cash,
            500,
            GeoPoint::new(72.8, 19.0),
        );
        assert!(!intent.is_matched());
    }

    #[test]
    fn blank_or_origin_location_is_unusable() {
        let mut profile = UserProfile {
            id: UserId::generate(),
            name: "U1".into(),
            location: "Mumbai".into(),
            coordinates: GeoPoint::new(72.8, 19.0),
        };
        assert!(profile.has_usable_location());

        profile.location = "   ".into();
        assert!(!profile.has_usable_location());

        profile.location = "Mumbai".into();
        profile.coordinates = GeoPoint::new(0.0, 0.0);
        assert!(!profile.has_usable_location());
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SettlementKind::Online).unwrap(),
            "\"online\""
        );
    }
}
