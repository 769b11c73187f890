//! Profile location handler
//!
//! The matcher's precondition: a profile must carry a non-blank location and
//! real coordinates before its user can create intents or search.

use axum::{Extension, Json, extract::State};
use cityswap_api::{ApiError, requests::UpdateLocationRequest, responses::ProfileResponse};
use cityswap_core::{GeoPoint, SwapStore, UserId, UserProfile};

use crate::state::AppState;

pub async fn update_location(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let existing = state.swaps.store().profile(user).await?;

    let name = request
        .name
        .or_else(|| existing.map(|profile| profile.name))
        .unwrap_or_default();

    let profile = state
        .swaps
        .set_profile(UserProfile {
            id: user,
            name,
            location: request.location,
            coordinates: GeoPoint::new(request.longitude, request.latitude),
        })
        .await?;

    Ok(Json(ProfileResponse {
        success: true,
        message: "Location updated".to_string(),
        profile,
    }))
}
