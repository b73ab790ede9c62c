//! Customer profile model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Customer profile, one per user account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub user_id: i32,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// National identification number
    pub id_number: Option<String>,
    pub license_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Update own customer profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(max = 15, message = "Phone must be at most 15 characters"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 12, message = "Identification number must be at most 12 characters"))]
    pub id_number: Option<String>,
    #[validate(length(max = 20, message = "License number must be at most 20 characters"))]
    pub license_number: Option<String>,
}
