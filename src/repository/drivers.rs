//! Driver roster methods on Repository

use super::{unique_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::driver::{CreateDriver, Driver, DriverStatus, UpdateDriver},
};

const DUPLICATE_DRIVER: &str = "A driver with this license or identification number already exists";

impl Repository {
    /// List all drivers
    pub async fn drivers_list(&self) -> AppResult<Vec<Driver>> {
        let rows = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn drivers_get_by_id(&self, id: i32) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", id)))
    }

    pub async fn drivers_create(&self, data: &CreateDriver) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (name, status, license_number, id_number, phone, email, address, experience)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.status.unwrap_or(DriverStatus::Available))
        .bind(&data.license_number)
        .bind(&data.id_number)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(data.experience.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, DUPLICATE_DRIVER))
    }

    pub async fn drivers_update(&self, id: i32, data: &UpdateDriver) -> AppResult<Driver> {
        sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = COALESCE($2, name),
                status = COALESCE($3, status),
                license_number = COALESCE($4, license_number),
                id_number = COALESCE($5, id_number),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email),
                address = COALESCE($8, address),
                experience = COALESCE($9, experience)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.status)
        .bind(&data.license_number)
        .bind(&data.id_number)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(data.experience)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, DUPLICATE_DRIVER))?
        .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", id)))
    }

    pub async fn drivers_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Driver {} not found", id)));
        }
        Ok(())
    }
}
