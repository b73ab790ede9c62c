//! Booking model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::text_enum;

/// How the vehicle is driven during the rental
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    #[default]
    SelfDrive,
    WithDriver,
}

text_enum!(DriveMode { SelfDrive => "self_drive", WithDriver => "with_driver" });

/// A numeric form field that may arrive as a JSON number or as text.
///
/// Parsing is lenient: callers decide the fallback for values that do not
/// read as a number. Any other JSON value lands in `Other` and reads as
/// invalid instead of rejecting the request.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub start_datetime: DateTime<Utc>,
    pub expected_return_datetime: DateTime<Utc>,
    pub actual_return_datetime: Option<DateTime<Utc>>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub night_halt: bool,
    pub drive_mode: DriveMode,
    /// Billed hours (already floored at the minimum block)
    pub hours_used: i32,
    pub distance_km: Decimal,
    pub start_km_reading: Option<i32>,
    pub end_km_reading: Option<i32>,
    /// Fare computed at booking time, before any damage fee
    pub base_amount: Decimal,
    pub total_amount: Decimal,
    pub advance_payment: Decimal,
    pub pending_payment: Decimal,
    pub is_returned: bool,
    pub returned_at: Option<DateTime<Utc>>,
    pub damage_reported: bool,
    pub damage_fee: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Booking with vehicle and customer labels for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub vehicle_category: String,
    pub vehicle_registration: String,
    pub customer_username: String,
}

/// Fully priced booking ready to be stored
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub start_datetime: DateTime<Utc>,
    pub expected_return_datetime: DateTime<Utc>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub night_halt: bool,
    pub drive_mode: DriveMode,
    pub hours_used: i32,
    pub distance_km: Decimal,
    pub start_km_reading: Option<i32>,
    pub base_amount: Decimal,
    pub advance_payment: Decimal,
    pub pending_payment: Decimal,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub vehicle_id: i32,
    #[validate(length(max = 100, message = "Pickup location must be at most 100 characters"))]
    pub pickup_location: Option<String>,
    #[validate(length(max = 100, message = "Drop location must be at most 100 characters"))]
    pub drop_location: Option<String>,
    pub start_datetime: DateTime<Utc>,
    pub expected_return_datetime: DateTime<Utc>,
    pub night_halt: Option<bool>,
    #[serde(default, alias = "drive_type")]
    pub drive_mode: DriveMode,
    /// Hours of use; values below the minimum block are raised to it
    pub hours_used: Option<NumericInput>,
    /// Trip distance in kilometers
    #[serde(alias = "km_to_destination", alias = "kms_to_destination")]
    pub distance_km: Option<NumericInput>,
    /// Identification number, required for self-drive
    #[serde(alias = "aadhaar_number")]
    #[validate(length(max = 12, message = "Identification number must be at most 12 characters"))]
    pub id_number: Option<String>,
    /// Driving license number, required for self-drive
    #[validate(length(max = 20, message = "License number must be at most 20 characters"))]
    pub license_number: Option<String>,
    pub start_km_reading: Option<i32>,
}

/// Fare preview request
#[derive(Debug, Deserialize, ToSchema)]
pub struct FareQuoteRequest {
    pub vehicle_id: i32,
    #[serde(default, alias = "drive_type")]
    pub drive_mode: DriveMode,
    pub hours_used: Option<NumericInput>,
    #[serde(alias = "km_to_destination", alias = "kms_to_destination")]
    pub distance_km: Option<NumericInput>,
}

/// Staff return form
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MarkReturned {
    #[serde(default)]
    pub damage_reported: bool,
    pub damage_fee: Option<NumericInput>,
    pub end_km_reading: Option<i32>,
}

/// Booking list with counters
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingList {
    pub bookings: Vec<BookingDetails>,
    /// Bookings not yet returned
    pub total_booked: i64,
    /// Bookings already returned
    pub total_returned: i64,
}

/// Result of a return submission
#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnOutcome {
    /// `returned` or `already_returned`
    pub status: String,
    pub booking: Booking,
}
