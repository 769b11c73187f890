//! CitySwap client: the consumer side of the matching protocol
//!
//! Wraps the REST surface in a [`SwapApi`] trait and drives it with the
//! [`MatchPoller`] state machine: create an intent, poll status on a fixed
//! cadence, commit against the best candidate, stop once paired.

pub mod api;
pub mod poller;

pub use api::{ClientError, ClientResult, HttpSwapApi, SwapApi};
pub use poller::{DEFAULT_POLL_INTERVAL, MatchPoller, PollerState};
