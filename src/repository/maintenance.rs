//! Vehicle maintenance log

use super::Repository;
use crate::{
    error::AppResult,
    models::maintenance::{CreateMaintenance, Maintenance},
};

impl Repository {
    /// Maintenance entries of a vehicle, most recent first
    pub async fn maintenance_list_for_vehicle(&self, vehicle_id: i32) -> AppResult<Vec<Maintenance>> {
        let rows = sqlx::query_as::<_, Maintenance>(
            "SELECT * FROM maintenance WHERE vehicle_id = $1 ORDER BY date DESC, id DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn maintenance_create(&self, vehicle_id: i32, data: &CreateMaintenance) -> AppResult<Maintenance> {
        let row = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenance (vehicle_id, date, description, cost)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(data.date)
        .bind(&data.description)
        .bind(data.cost)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
