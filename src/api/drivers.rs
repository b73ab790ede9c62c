//! Driver roster endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::driver::{CreateDriver, Driver, DriverList, UpdateDriver},
};

use super::AuthenticatedUser;

/// List drivers with their total
#[utoipa::path(
    get,
    path = "/drivers",
    tag = "drivers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Driver list", body = DriverList)
    )
)]
pub async fn list_drivers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DriverList>> {
    let drivers = state.services.drivers.list().await?;
    Ok(Json(drivers))
}

/// Get driver by ID
#[utoipa::path(
    get,
    path = "/drivers/{id}",
    tag = "drivers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Driver details", body = Driver),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn get_driver(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Driver>> {
    let driver = state.services.drivers.get_by_id(id).await?;
    Ok(Json(driver))
}

/// Add a driver
#[utoipa::path(
    post,
    path = "/drivers",
    tag = "drivers",
    security(("bearer_auth" = [])),
    request_body = CreateDriver,
    responses(
        (status = 201, description = "Driver created", body = Driver),
        (status = 409, description = "License or identification number already registered")
    )
)]
pub async fn create_driver(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateDriver>,
) -> AppResult<(StatusCode, Json<Driver>)> {
    claims.require_superuser()?;
    let driver = state.services.drivers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

/// Update driver
#[utoipa::path(
    put,
    path = "/drivers/{id}",
    tag = "drivers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Driver ID")),
    request_body = UpdateDriver,
    responses(
        (status = 200, description = "Driver updated", body = Driver)
    )
)]
pub async fn update_driver(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateDriver>,
) -> AppResult<Json<Driver>> {
    claims.require_superuser()?;
    let driver = state.services.drivers.update(id, &data).await?;
    Ok(Json(driver))
}

/// Delete driver
#[utoipa::path(
    delete,
    path = "/drivers/{id}",
    tag = "drivers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Driver ID")),
    responses(
        (status = 204, description = "Driver deleted")
    )
)]
pub async fn delete_driver(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    state.services.drivers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
