//! Admin dashboard endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::Dashboard};

use super::AuthenticatedUser;

/// Fleet and revenue overview
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard figures", body = Dashboard),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Dashboard>> {
    claims.require_superuser()?;
    let dashboard = state.services.stats.dashboard().await?;
    Ok(Json(dashboard))
}
