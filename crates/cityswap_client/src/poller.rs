//! The client-side matching state machine
//!
//! Matching is pull-based: the client polls its intent's status until either
//! it commits a pairing against the best candidate or discovers the other
//! side already committed one. Most failures are transient by assumption
//! (network blips, concurrent cancellation) and resume polling rather than
//! aborting the session.

use std::time::Duration;

use cityswap_core::SwapId;
use tracing::{debug, info, warn};

use crate::api::{ClientResult, SwapApi};

/// Default reference poll cadence
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Polling loop states. `Matched` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// No live intent
    Idle,
    /// Waiting for the next tick
    Polling,
    /// A commit attempt is in flight; re-entrant ticks are skipped, not queued
    Matching,
    /// Paired with the given peer intent
    Matched(SwapId),
    Cancelled,
}

impl PollerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollerState::Matched(_) | PollerState::Cancelled)
    }
}

/// Drives one swap intent from creation to pairing
pub struct MatchPoller<A> {
    api: A,
    swap_id: SwapId,
    state: PollerState,
    interval: Duration,
}

impl<A: SwapApi> MatchPoller<A> {
    /// Poll an already-created intent
    pub fn new(api: A, swap_id: SwapId) -> Self {
        Self {
            api,
            swap_id,
            state: PollerState::Polling,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn swap_id(&self) -> SwapId {
        self.swap_id
    }

    /// The peer intent id, once matched
    pub fn peer(&self) -> Option<SwapId> {
        match self.state {
            PollerState::Matched(peer) => Some(peer),
            _ => None,
        }
    }

    /// One poll step.
    ///
    /// Skipped in terminal states and while a commit attempt is in flight.
    /// Status-fetch and commit failures are logged and polling resumes; the
    /// only hard transitions out are a committed pairing (ours or the other
    /// side's) and explicit cancellation.
    pub async fn tick(&mut self) {
        match self.state {
            PollerState::Polling => {}
            PollerState::Matching => {
                debug!(swap = %self.swap_id, "tick skipped, commit in flight");
                return;
            }
            _ => return,
        }

        let status = match self.api.status(self.swap_id).await {
            Ok(status) => status,
            Err(err) => {
                warn!(swap = %self.swap_id, %err, "status poll failed, will retry");
                return;
            }
        };

        // Someone else already committed the pairing; same as a
        // self-initiated match
        if let Some(peer) = status.matched_swap {
            info!(swap = %self.swap_id, peer = %peer.intent.id, "matched by the other side");
            self.state = PollerState::Matched(peer.intent.id);
            return;
        }

        let Some(candidate) = status.candidates.first() else {
            debug!(swap = %self.swap_id, "no candidates yet");
            return;
        };
        let candidate_id = candidate.intent.id;

        self.state = PollerState::Matching;
        match self.api.attempt_match(self.swap_id, candidate_id).await {
            Ok(outcome) if outcome.committed => {
                info!(swap = %self.swap_id, peer = %candidate_id, "match committed");
                self.state = PollerState::Matched(candidate_id);
            }
            Ok(outcome) if outcome.already_matched => {
                // The pairing may have landed against a different candidate;
                // refetch to discover the actual peer
                match self.api.status(self.swap_id).await {
                    Ok(status) => match status.matched_swap {
                        Some(peer) => {
                            info!(swap = %self.swap_id, peer = %peer.intent.id, "already matched");
                            self.state = PollerState::Matched(peer.intent.id);
                        }
                        None => {
                            // Our candidate was taken by a third party
                            debug!(swap = %self.swap_id, "candidate taken elsewhere, resuming");
                            self.state = PollerState::Polling;
                        }
                    },
                    Err(err) => {
                        warn!(swap = %self.swap_id, %err, "status refetch failed, resuming");
                        self.state = PollerState::Polling;
                    }
                }
            }
            Ok(_) => {
                self.state = PollerState::Polling;
            }
            Err(err) => {
                warn!(swap = %self.swap_id, %err, "match attempt failed, resuming");
                self.state = PollerState::Polling;
            }
        }
    }

    /// Timer-driven loop: tick on a fixed cadence until a terminal state
    pub async fn run(&mut self) -> PollerState {
        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        while !self.state.is_terminal() {
            timer.tick().await;
            self.tick().await;
        }
        self.state
    }

    /// Cancel the intent. Valid from any non-terminal state; stops the loop
    /// and reverts to `Idle`.
    pub async fn cancel(&mut self) -> ClientResult<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        self.api.cancel(self.swap_id).await?;
        info!(swap = %self.swap_id, "swap cancelled");
        self.state = PollerState::Idle;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: PollerState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientError, ClientResult, SwapApi};
    use async_trait::async_trait;
    use cityswap_api::responses::{MatchResponse, StatusResponse};
    use cityswap_core::{
        Candidate, GeoPoint, MatchedPeer, SettlementKind, SwapIntent, UserId, UserProfile,
    };
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    fn intent(kind: SettlementKind) -> SwapIntent {
        SwapIntent::new(UserId::generate(), kind, 100, GeoPoint::new(72.8, 19.0))
    }

    fn profile_for(intent: &SwapIntent) -> UserProfile {
        UserProfile {
            id: intent.owner,
            name: "peer".into(),
            location: "Mumbai".into(),
            coordinates: intent.location,
        }
    }

    fn empty_status() -> StatusResponse {
        StatusResponse {
            success: true,
            matched_swap: None,
            candidates: Vec::new(),
        }
    }

    fn status_with_candidate(candidate: &SwapIntent) -> StatusResponse {
        StatusResponse {
            success: true,
            matched_swap: None,
            candidates: vec![Candidate {
                intent: candidate.clone(),
                owner: profile_for(candidate),
                distance_km: 1.2,
            }],
        }
    }

    fn status_matched(peer: &SwapIntent) -> StatusResponse {
        StatusResponse {
            success: true,
            matched_swap: Some(MatchedPeer {
                intent: peer.clone(),
                owner: profile_for(peer),
            }),
            candidates: Vec::new(),
        }
    }

    fn transport_error() -> ClientError {
        ClientError::Transport {
            message: "connection reset".into(),
        }
    }

    /// Scripted API: each call pops the next queued response
    #[derive(Default)]
    struct ScriptedApi {
        statuses: Mutex<VecDeque<ClientResult<StatusResponse>>>,
        matches: Mutex<VecDeque<ClientResult<MatchResponse>>>,
        cancels: Mutex<usize>,
    }

    impl ScriptedApi {
        fn push_status(&self, result: ClientResult<StatusResponse>) {
            self.statuses.lock().push_back(result);
        }

        fn push_match(&self, result: ClientResult<MatchResponse>) {
            self.matches.lock().push_back(result);
        }
    }

    #[async_trait]
    impl SwapApi for &ScriptedApi {
        async fn create(&self, kind: SettlementKind, amount: u64) -> ClientResult<SwapIntent> {
            Ok(SwapIntent::new(
                UserId::generate(),
                kind,
                amount,
                GeoPoint::new(72.8, 19.0),
            ))
        }

        async fn status(&self, _swap: SwapId) -> ClientResult<StatusResponse> {
            self.statuses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(empty_status()))
        }

        async fn attempt_match(&self, _a: SwapId, _b: SwapId) -> ClientResult<MatchResponse> {
            self.matches
                .lock()
                .pop_front()
                .expect("unexpected attempt_match call")
        }

        async fn cancel(&self, _swap: SwapId) -> ClientResult<()> {
            *self.cancels.lock() += 1;
            Ok(())
        }
    }

    fn committed() -> MatchResponse {
        MatchResponse {
            success: true,
            message: "Swaps matched successfully".into(),
            committed: true,
            already_matched: false,
        }
    }

    fn already_matched() -> MatchResponse {
        MatchResponse {
            success: true,
            message: "Already matched!".into(),
            committed: false,
            already_matched: true,
        }
    }

    #[tokio::test]
    async fn keeps_polling_while_no_candidates() {
        let api = ScriptedApi::default();
        api.push_status(Ok(empty_status()));

        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Polling);
    }

    #[tokio::test]
    async fn commits_against_best_candidate() {
        let api = ScriptedApi::default();
        let candidate = intent(SettlementKind::Online);
        api.push_status(Ok(status_with_candidate(&candidate)));
        api.push_match(Ok(committed()));

        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Matched(candidate.id));
        assert_eq!(poller.peer(), Some(candidate.id));
    }

    #[tokio::test]
    async fn other_side_committing_ends_polling() {
        let api = ScriptedApi::default();
        let peer = intent(SettlementKind::Online);
        api.push_status(Ok(status_matched(&peer)));

        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Matched(peer.id));
    }

    #[tokio::test]
    async fn already_matched_refetches_actual_peer() {
        let api = ScriptedApi::default();
        let candidate = intent(SettlementKind::Online);
        // The commit lands against a different peer than the one attempted
        let actual_peer = intent(SettlementKind::Online);
        api.push_status(Ok(status_with_candidate(&candidate)));
        api.push_match(Ok(already_matched()));
        api.push_status(Ok(status_matched(&actual_peer)));

        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Matched(actual_peer.id));
    }

    #[tokio::test]
    async fn candidate_taken_elsewhere_resumes_polling() {
        let api = ScriptedApi::default();
        let candidate = intent(SettlementKind::Online);
        api.push_status(Ok(status_with_candidate(&candidate)));
        api.push_match(Ok(already_matched()));
        // Refetch shows we are still unmatched: our candidate paired with a
        // third party
        api.push_status(Ok(empty_status()));

        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Polling);
    }

    #[tokio::test]
    async fn transient_errors_resume_polling() {
        let api = ScriptedApi::default();
        api.push_status(Err(transport_error()));

        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Polling);

        // A failed commit attempt also resumes rather than aborting
        let candidate = intent(SettlementKind::Online);
        api.push_status(Ok(status_with_candidate(&candidate)));
        api.push_match(Err(transport_error()));
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Polling);
    }

    #[tokio::test]
    async fn ticks_are_skipped_while_commit_in_flight() {
        let api = ScriptedApi::default();
        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.force_state(PollerState::Matching);

        // No scripted responses: a non-skipped tick would panic the mock
        poller.tick().await;
        assert_eq!(poller.state(), PollerState::Matching);
    }

    #[tokio::test]
    async fn cancel_reverts_to_idle_and_calls_api() {
        let api = ScriptedApi::default();
        let mut poller = MatchPoller::new(&api, SwapId::generate());
        poller.cancel().await.unwrap();
        assert_eq!(poller.state(), PollerState::Idle);
        assert_eq!(*api.cancels.lock(), 1);
    }

    #[tokio::test]
    async fn run_loops_until_terminal() {
        let api = ScriptedApi::default();
        let candidate = intent(SettlementKind::Online);
        api.push_status(Ok(empty_status()));
        api.push_status(Ok(status_with_candidate(&candidate)));
        api.push_match(Ok(committed()));

        let mut poller =
            MatchPoller::new(&api, SwapId::generate()).with_interval(Duration::from_millis(1));
        let finished = poller.run().await;
        assert_eq!(finished, PollerState::Matched(candidate.id));
    }
}
