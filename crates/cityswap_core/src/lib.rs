//! CitySwap Core - Swap-Intent Matching Kernel
//!
//! This crate provides the geolocated cash/online swap matching subsystem:
//! the swap-intent model and geospatial store, the match finder, the
//! canonically-ordered match committer, and the lifecycle service that owns
//! all intent state.

pub mod committer;
pub mod error;
pub mod geo;
pub mod id;
pub mod matcher;
pub mod model;
pub mod service;
pub mod store;

// Macros are automatically available at crate root due to #[macro_export]

pub use committer::{MatchCommitter, MatchOutcome, canonical_pair};
pub use error::{CoreError, Result};
pub use geo::GeoPoint;
pub use id::{Id, IdType, SwapId, UserId};
pub use matcher::{Candidate, find_candidates};
pub use model::{SettlementKind, SwapIntent, UserProfile};
pub use service::{MatchStatus, MatchedPeer, SwapService};
pub use store::{MemoryStore, SwapStore};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Candidate, CoreError, GeoPoint, Id, IdType, MatchOutcome, MatchStatus, MatchedPeer,
        MemoryStore, Result, SettlementKind, SwapId, SwapIntent, SwapService, SwapStore,
        UserId, UserProfile,
    };
}
