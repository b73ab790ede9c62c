//! Driver model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::text_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Available,
    Assigned,
    OnLeave,
}

text_enum!(DriverStatus {
    Available => "AVAILABLE",
    Assigned => "ASSIGNED",
    OnLeave => "ON_LEAVE",
});

/// Driver record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Driver {
    pub id: i32,
    pub name: String,
    pub status: DriverStatus,
    pub license_number: String,
    pub id_number: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Years of experience
    pub experience: i32,
    pub created_at: DateTime<Utc>,
}

/// Create driver request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDriver {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub status: Option<DriverStatus>,
    #[validate(length(min = 1, max = 20, message = "License number must be 1-20 characters"))]
    pub license_number: String,
    #[validate(length(min = 1, max = 12, message = "Identification number must be 1-12 characters"))]
    pub id_number: String,
    #[validate(length(min = 1, max = 15, message = "Phone must be 1-15 characters"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience: Option<i32>,
}

/// Update driver request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDriver {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub status: Option<DriverStatus>,
    #[validate(length(min = 1, max = 20, message = "License number must be 1-20 characters"))]
    pub license_number: Option<String>,
    #[validate(length(min = 1, max = 12, message = "Identification number must be 1-12 characters"))]
    pub id_number: Option<String>,
    #[validate(length(min = 1, max = 15, message = "Phone must be 1-15 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience: Option<i32>,
}

/// Driver list with total
#[derive(Debug, Serialize, ToSchema)]
pub struct DriverList {
    pub drivers: Vec<Driver>,
    pub total_drivers: i64,
}
