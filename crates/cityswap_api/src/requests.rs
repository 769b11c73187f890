//! API request types

use cityswap_core::{SettlementKind, SwapId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Create a new swap intent
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateSwapRequest {
    /// What the caller is offering; they want the complement in return
    pub kind: SettlementKind,
    pub amount: u64,
}

/// Commit a pairing between two intents. Either participant may send this,
/// with the ids in either order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchRequest {
    pub intent_a: SwapId,
    pub intent_b: SwapId,
}

/// Set the caller's profile location (the matching precondition)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLocationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display string, e.g. "Andheri West, Mumbai"
    pub location: String,
    pub longitude: f64,
    pub latitude: f64,
}
