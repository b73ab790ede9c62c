//! Own customer profile endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::customer::{Customer, UpdateCustomer},
};

use super::AuthenticatedUser;

/// Own customer profile
#[utoipa::path(
    get,
    path = "/customers/me",
    tag = "customers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customer profile", body = Customer),
        (status = 404, description = "No customer profile for this account")
    )
)]
pub async fn get_my_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_for_user(claims.user_id).await?;
    Ok(Json(customer))
}

/// Update own customer profile
#[utoipa::path(
    put,
    path = "/customers/me",
    tag = "customers",
    security(("bearer_auth" = [])),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer profile updated", body = Customer),
        (status = 409, description = "Identification number already registered")
    )
)]
pub async fn update_my_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    let customer = state
        .services
        .customers
        .update_for_user(claims.user_id, &data)
        .await?;
    Ok(Json(customer))
}
