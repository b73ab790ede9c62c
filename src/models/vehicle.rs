//! Vehicle (fleet unit type) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::text_enum;

/// Air-conditioning type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AcType {
    #[serde(rename = "AC")]
    Ac,
    #[serde(rename = "Non-AC")]
    NonAc,
}

text_enum!(AcType { Ac => "AC", NonAc => "Non-AC" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Gas,
    Electric,
}

text_enum!(FuelType {
    Petrol => "petrol",
    Diesel => "diesel",
    Gas => "gas",
    Electric => "electric",
});

/// Operational status of a vehicle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Repair,
}

text_enum!(VehicleStatus { Available => "available", Repair => "repair" });

/// Vehicle model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vehicle {
    pub id: i32,
    pub category: String,
    pub ac_type: AcType,
    pub registration_number: String,
    /// Listed price shown in the catalog
    pub price: Decimal,
    pub price_per_hour: Decimal,
    pub price_per_km: Decimal,
    pub fuel_type: FuelType,
    /// Units currently available for booking
    pub total_cars: i32,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

/// Rates used to price a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCard {
    pub per_hour: Decimal,
    pub per_km: Decimal,
}

impl Vehicle {
    pub fn rate_card(&self) -> RateCard {
        RateCard {
            per_hour: self.price_per_hour,
            per_km: self.price_per_km,
        }
    }
}

/// Catalog search parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct VehicleQuery {
    /// Matches category, AC type or fuel type (case-insensitive)
    pub q: Option<String>,
}

/// Create vehicle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicle {
    #[validate(length(min = 1, max = 20, message = "Category must be 1-20 characters"))]
    pub category: String,
    pub ac_type: AcType,
    #[validate(length(min = 1, max = 20, message = "Registration number must be 1-20 characters"))]
    pub registration_number: String,
    pub price: Decimal,
    pub price_per_hour: Decimal,
    pub price_per_km: Decimal,
    pub fuel_type: Option<FuelType>,
    #[validate(range(min = 0, message = "Fleet count cannot be negative"))]
    pub total_cars: Option<i32>,
    pub status: Option<VehicleStatus>,
}

/// Update vehicle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicle {
    #[validate(length(min = 1, max = 20, message = "Category must be 1-20 characters"))]
    pub category: Option<String>,
    pub ac_type: Option<AcType>,
    #[validate(length(min = 1, max = 20, message = "Registration number must be 1-20 characters"))]
    pub registration_number: Option<String>,
    pub price: Option<Decimal>,
    pub price_per_hour: Option<Decimal>,
    pub price_per_km: Option<Decimal>,
    pub fuel_type: Option<FuelType>,
    #[validate(range(min = 0, message = "Fleet count cannot be negative"))]
    pub total_cars: Option<i32>,
    pub status: Option<VehicleStatus>,
}

impl CreateVehicle {
    /// Rates and prices must not be negative
    pub fn check_amounts(&self) -> Result<(), String> {
        check_non_negative(&[
            ("price", Some(self.price)),
            ("price_per_hour", Some(self.price_per_hour)),
            ("price_per_km", Some(self.price_per_km)),
        ])
    }
}

impl UpdateVehicle {
    pub fn check_amounts(&self) -> Result<(), String> {
        check_non_negative(&[
            ("price", self.price),
            ("price_per_hour", self.price_per_hour),
            ("price_per_km", self.price_per_km),
        ])
    }
}

fn check_non_negative(amounts: &[(&str, Option<Decimal>)]) -> Result<(), String> {
    for (name, amount) in amounts {
        if let Some(value) = amount {
            if *value < Decimal::ZERO {
                return Err(format!("{} cannot be negative", name));
            }
        }
    }
    Ok(())
}
