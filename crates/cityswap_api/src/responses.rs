//! API response types
//!
//! Every response carries the uniform `success` flag; error responses use the
//! same envelope with `success: false` (see [`crate::ApiError`]).

use cityswap_core::{Candidate, MatchedPeer, SwapIntent, UserProfile};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A created or fetched swap intent
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwapResponse {
    pub success: bool,
    pub message: String,
    pub swap: SwapIntent,
}

/// Ranked candidate listing
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CandidatesResponse {
    pub success: bool,
    pub message: String,
    pub candidates: Vec<Candidate>,
}

/// One poll step's view: the committed peer, or the current best candidate
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
    pub success: bool,
    /// Set once the pairing landed, from whichever side committed it
    pub matched_swap: Option<MatchedPeer>,
    /// At most one entry: the best candidate to attempt
    pub candidates: Vec<Candidate>,
}

/// Outcome of a commit attempt
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchResponse {
    pub success: bool,
    pub message: String,
    /// This call created the pairing
    pub committed: bool,
    /// The pairing already existed; the caller should stop polling and
    /// refetch status to discover its actual peer
    pub already_matched: bool,
}

/// Cancellation acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CancelResponse {
    pub success: bool,
    pub message: String,
}

/// Profile location upsert acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub profile: UserProfile,
}

/// Service liveness
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}
