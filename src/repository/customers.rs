//! Customer profile methods on Repository

use sqlx::PgConnection;

use super::{unique_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, UpdateCustomer},
    services::fare::Credentials,
};

impl Repository {
    /// Get the profile attached to a user account
    pub async fn customers_get_by_user(&self, user_id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer profile for user {} not found", user_id)))
    }

    /// Create an empty profile unless one exists already
    pub async fn customers_ensure(&self, conn: &mut PgConnection, user_id: i32) -> AppResult<Customer> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING *
            "#,
        )
        .bind(user_id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    /// Record identification and license numbers, creating the profile lazily
    pub async fn customers_store_credentials(
        &self,
        conn: &mut PgConnection,
        user_id: i32,
        credentials: &Credentials,
    ) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (user_id, id_number, license_number)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET id_number = EXCLUDED.id_number,
                license_number = EXCLUDED.license_number
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&credentials.id_number)
        .bind(&credentials.license_number)
        .fetch_one(conn)
        .await
        .map_err(|e| unique_violation(e, "Identification number is already registered to another customer"))
    }

    /// Update own profile; absent fields keep their value
    pub async fn customers_update(&self, user_id: i32, data: &UpdateCustomer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (user_id, phone, address, id_number, license_number)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET phone = COALESCE(EXCLUDED.phone, customers.phone),
                address = COALESCE(EXCLUDED.address, customers.address),
                id_number = COALESCE(EXCLUDED.id_number, customers.id_number),
                license_number = COALESCE(EXCLUDED.license_number, customers.license_number)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.id_number)
        .bind(&data.license_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "Identification number is already registered to another customer"))
    }
}
