//! Vehicle domain methods on Repository

use sqlx::PgConnection;

use super::{unique_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::vehicle::{CreateVehicle, FuelType, UpdateVehicle, Vehicle, VehicleStatus},
};

impl Repository {
    /// List vehicles, optionally filtered by a case-insensitive term
    /// matched against category, AC type and fuel type
    pub async fn vehicles_list(&self, term: Option<&str>) -> AppResult<Vec<Vehicle>> {
        let pattern = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("%{}%", t));

        let rows = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE $1::text IS NULL
               OR category ILIKE $1
               OR ac_type ILIKE $1
               OR fuel_type ILIKE $1
            ORDER BY category, id
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get vehicle by ID
    pub async fn vehicles_get_by_id(&self, id: i32) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))
    }

    /// Create vehicle
    pub async fn vehicles_create(&self, data: &CreateVehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (category, ac_type, registration_number, price,
                                  price_per_hour, price_per_km, fuel_type, total_cars, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.category)
        .bind(data.ac_type)
        .bind(&data.registration_number)
        .bind(data.price)
        .bind(data.price_per_hour)
        .bind(data.price_per_km)
        .bind(data.fuel_type.unwrap_or(FuelType::Diesel))
        .bind(data.total_cars.unwrap_or(1))
        .bind(data.status.unwrap_or(VehicleStatus::Available))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, format!("Registration number {} already exists", data.registration_number)))
    }

    /// Update vehicle
    pub async fn vehicles_update(&self, id: i32, data: &UpdateVehicle) -> AppResult<Vehicle> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.category, "category");
        add_field!(data.ac_type, "ac_type");
        add_field!(data.registration_number, "registration_number");
        add_field!(data.price, "price");
        add_field!(data.price_per_hour, "price_per_hour");
        add_field!(data.price_per_km, "price_per_km");
        add_field!(data.fuel_type, "fuel_type");
        add_field!(data.total_cars, "total_cars");
        add_field!(data.status, "status");

        if sets.is_empty() {
            return self.vehicles_get_by_id(id).await;
        }

        let query = format!("UPDATE vehicles SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);
        let mut builder = sqlx::query_as::<_, Vehicle>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.category);
        bind_field!(data.ac_type);
        bind_field!(data.registration_number);
        bind_field!(data.price);
        bind_field!(data.price_per_hour);
        bind_field!(data.price_per_km);
        bind_field!(data.fuel_type);
        bind_field!(data.total_cars);
        bind_field!(data.status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unique_violation(e, "Registration number already exists"))?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))
    }

    /// Delete vehicle
    pub async fn vehicles_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehicle {} not found", id)));
        }
        Ok(())
    }

    /// Take one unit out of the pool. The decrement only happens while
    /// units remain, so concurrent callers can never drive the count below 0.
    pub async fn vehicles_reserve_unit(&self, conn: &mut PgConnection, id: i32) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET total_cars = total_cars - 1
            WHERE id = $1 AND total_cars > 0
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(AppError::FleetExhausted(id))
    }

    /// Put one unit back into the pool
    pub async fn vehicles_release_unit(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE vehicles SET total_cars = total_cars + 1 WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
