//! Repository layer for database operations

pub mod bookings;
pub mod customers;
pub mod drivers;
pub mod maintenance;
pub mod stats;
pub mod users;
pub mod vehicles;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool.
///
/// Domain methods live in the submodules as `impl Repository` blocks,
/// prefixed with their domain (`vehicles_get_by_id`, `bookings_list_returned`).
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Turn a unique-constraint violation into a 409, anything else stays a database error
pub(crate) fn unique_violation(err: sqlx::Error, message: impl Into<String>) -> crate::error::AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            crate::error::AppError::Conflict(message.into())
        }
        _ => crate::error::AppError::Database(err),
    }
}
