//! Swap intent handlers: lifecycle, candidate search, status, commit

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use cityswap_api::{
    ApiError,
    requests::{CreateSwapRequest, MatchRequest},
    responses::{CancelResponse, CandidatesResponse, MatchResponse, StatusResponse, SwapResponse},
};
use cityswap_core::{SwapId, UserId};
use tracing::instrument;

use crate::state::AppState;

/// Create a swap intent for the authenticated user
#[instrument(skip(state, request), fields(user = %user))]
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<CreateSwapRequest>,
) -> Result<Json<SwapResponse>, ApiError> {
    let swap = state
        .swaps
        .create(user, request.kind, request.amount)
        .await?;

    Ok(Json(SwapResponse {
        success: true,
        message: "Swap created".to_string(),
        swap,
    }))
}

/// Owner-gated fetch of a single intent
pub async fn fetch(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<SwapId>,
) -> Result<Json<SwapResponse>, ApiError> {
    let swap = state.swaps.fetch(id, user).await?;

    Ok(Json(SwapResponse {
        success: true,
        message: "Swap fetched".to_string(),
        swap,
    }))
}

/// Full ranked candidate listing (the exploratory "show nearby" view)
pub async fn candidates(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<SwapId>,
) -> Result<Json<CandidatesResponse>, ApiError> {
    let candidates = state.swaps.candidates(id, user).await?;

    Ok(Json(CandidatesResponse {
        success: true,
        message: "Nearest swaps fetched".to_string(),
        candidates,
    }))
}

/// One poll step: the committed peer if matched, else the best candidate
pub async fn status(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<SwapId>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state.swaps.status(id, user).await?;

    Ok(Json(StatusResponse {
        success: true,
        matched_swap: status.matched,
        candidates: status.candidates,
    }))
}

/// Commit a pairing; safe for both participants to call concurrently
#[instrument(skip(state), fields(user = %user))]
pub async fn commit(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let outcome = state
        .swaps
        .attempt_match(request.intent_a, request.intent_b)
        .await?;

    let message = if outcome.already_matched {
        "Already matched!"
    } else {
        "Swaps matched successfully"
    };

    Ok(Json(MatchResponse {
        success: true,
        message: message.to_string(),
        committed: outcome.committed,
        already_matched: outcome.already_matched,
    }))
}

/// Cancel an intent; un-pairs the peer first if one exists
pub async fn cancel(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<SwapId>,
) -> Result<Json<CancelResponse>, ApiError> {
    state.swaps.cancel(id, user).await?;

    Ok(Json(CancelResponse {
        success: true,
        message: "Swap cancelled successfully".to_string(),
    }))
}
