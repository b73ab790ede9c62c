//! Customer booking endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::booking::{Booking, BookingDetails, BookingList, CreateBooking, FareQuoteRequest},
    services::fare::Fare,
};

use super::AuthenticatedUser;

/// Book a vehicle
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Missing credentials for self-drive or invalid input"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "No units left for this vehicle"),
        (status = 422, description = "Vehicle under repair")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.services.bookings.create(claims.user_id, &request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List bookings (staff: active fleet bookings, customers: their own)
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings with active and returned counts", body = BookingList)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<BookingList>> {
    let list = state.services.bookings.list_for(&claims).await?;
    Ok(Json(list))
}

/// Get booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 403, description = "Booking belongs to another customer"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(id, &claims).await?;
    Ok(Json(booking))
}

/// Own returned bookings, most recent first
#[utoipa::path(
    get,
    path = "/bookings/returned",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Returned bookings", body = Vec<BookingDetails>)
    )
)]
pub async fn list_returned_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state
        .services
        .bookings
        .list_returned(Some(claims.user_id))
        .await?;
    Ok(Json(bookings))
}

/// Preview the fare of a trip
#[utoipa::path(
    post,
    path = "/bookings/fare-quote",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = FareQuoteRequest,
    responses(
        (status = 200, description = "Fare breakdown", body = Fare),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn fare_quote(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<FareQuoteRequest>,
) -> AppResult<Json<Fare>> {
    let fare = state.services.bookings.fare_quote(&request).await?;
    Ok(Json(fare))
}
