//! Trip distance estimate endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    services::distance::{DistanceEstimate, DistanceRequest},
};

use super::AuthenticatedUser;

/// Estimate distance, duration and fare between two addresses
#[utoipa::path(
    post,
    path = "/distance/estimate",
    tag = "distance",
    security(("bearer_auth" = [])),
    request_body = DistanceRequest,
    responses(
        (status = 200, description = "Route estimate", body = DistanceEstimate),
        (status = 400, description = "Origin or destination missing"),
        (status = 502, description = "Distance provider error", body = crate::error::ErrorResponse),
        (status = 504, description = "Distance provider timed out", body = crate::error::ErrorResponse)
    )
)]
pub async fn estimate(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<DistanceRequest>,
) -> AppResult<Json<DistanceEstimate>> {
    let estimate = state
        .services
        .distance
        .estimate(&request.origin, &request.destination)
        .await?;
    Ok(Json(estimate))
}
