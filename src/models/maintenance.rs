//! Vehicle maintenance log

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Maintenance {
    pub id: i32,
    pub vehicle_id: i32,
    pub date: NaiveDate,
    pub description: String,
    pub cost: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub cost: Decimal,
}
