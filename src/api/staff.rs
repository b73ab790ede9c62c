//! Staff desk: active bookings and vehicle returns

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::booking::{BookingDetails, BookingList, MarkReturned, ReturnOutcome},
};

use super::AuthenticatedUser;

/// Active bookings, newest start first
#[utoipa::path(
    get,
    path = "/staff/bookings",
    tag = "staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active bookings with counts", body = BookingList),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn list_active_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<BookingList>> {
    claims.require_staff()?;
    let list = state.services.bookings.list_active().await?;
    Ok(Json(list))
}

/// Returned bookings, most recent return first
#[utoipa::path(
    get,
    path = "/staff/returns",
    tag = "staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Returned bookings", body = Vec<BookingDetails>)
    )
)]
pub async fn list_returns(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookingDetails>>> {
    claims.require_staff()?;
    let bookings = state.services.bookings.list_returned(None).await?;
    Ok(Json(bookings))
}

/// Record the return of a vehicle with damage details.
///
/// Submitting again for a returned booking replaces the damage details and
/// recomputes the balance without releasing another fleet unit.
#[utoipa::path(
    post,
    path = "/staff/returns/{id}",
    tag = "staff",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = MarkReturned,
    responses(
        (status = 200, description = "Booking settled", body = ReturnOutcome),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn mark_returned(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(form): Json<MarkReturned>,
) -> AppResult<Json<ReturnOutcome>> {
    claims.require_staff()?;
    let outcome = state.services.bookings.mark_returned(id, &form).await?;
    Ok(Json(outcome))
}

/// Return a vehicle keeping the stored damage details
#[utoipa::path(
    post,
    path = "/staff/returns/{id}/quick",
    tag = "staff",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking returned, or already_returned", body = ReturnOutcome),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn quick_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ReturnOutcome>> {
    claims.require_staff()?;
    let outcome = state.services.bookings.quick_return(id).await?;
    Ok(Json(outcome))
}
