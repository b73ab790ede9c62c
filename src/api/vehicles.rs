//! Fleet catalog and maintenance endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        maintenance::{CreateMaintenance, Maintenance},
        vehicle::{CreateVehicle, UpdateVehicle, Vehicle, VehicleQuery},
    },
};

use super::AuthenticatedUser;

/// Browse the fleet
#[utoipa::path(
    get,
    path = "/vehicles",
    tag = "vehicles",
    params(VehicleQuery),
    responses(
        (status = 200, description = "Vehicles matching the search term", body = Vec<Vehicle>)
    )
)]
pub async fn list_vehicles(
    State(state): State<crate::AppState>,
    Query(query): Query<VehicleQuery>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state.services.vehicles.search(query.q.as_deref()).await?;
    Ok(Json(vehicles))
}

/// Get vehicle by ID
#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = Vehicle),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.services.vehicles.get_by_id(id).await?;
    Ok(Json(vehicle))
}

/// Add a vehicle type to the fleet
#[utoipa::path(
    post,
    path = "/vehicles",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicle,
    responses(
        (status = 201, description = "Vehicle created", body = Vehicle),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Registration number already exists")
    )
)]
pub async fn create_vehicle(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateVehicle>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    claims.require_superuser()?;
    let vehicle = state.services.vehicles.create(&data).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Update vehicle
#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = UpdateVehicle,
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle)
    )
)]
pub async fn update_vehicle(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateVehicle>,
) -> AppResult<Json<Vehicle>> {
    claims.require_superuser()?;
    let vehicle = state.services.vehicles.update(id, &data).await?;
    Ok(Json(vehicle))
}

/// Delete vehicle
#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 204, description = "Vehicle deleted")
    )
)]
pub async fn delete_vehicle(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    state.services.vehicles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Maintenance history of a vehicle
#[utoipa::path(
    get,
    path = "/vehicles/{id}/maintenance",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Maintenance entries", body = Vec<Maintenance>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Maintenance>>> {
    claims.require_staff()?;
    let entries = state.services.vehicles.list_maintenance(id).await?;
    Ok(Json(entries))
}

/// Log a maintenance entry
#[utoipa::path(
    post,
    path = "/vehicles/{id}/maintenance",
    tag = "vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Maintenance logged", body = Maintenance)
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<Maintenance>)> {
    claims.require_staff()?;
    let entry = state.services.vehicles.add_maintenance(id, &data).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
