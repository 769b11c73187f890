//! CitySwap API types and definitions
//!
//! This crate defines the request/response types for the CitySwap swap
//! service, shared between server and client implementations.

pub mod error;
pub mod requests;
pub mod responses;

pub use error::ApiError;

// Re-export common types from cityswap-core
pub use cityswap_core::id::{SwapId, UserId};
pub use cityswap_core::model::{SettlementKind, SwapIntent, UserProfile};
pub use cityswap_core::{Candidate, MatchOutcome, MatchedPeer};

/// API version constant
pub const API_VERSION: &str = "v1";
