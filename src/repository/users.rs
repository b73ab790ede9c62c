//! User account methods on Repository

use sqlx::PgConnection;

use super::{unique_violation, Repository};
use crate::{
    error::{AppError, AppResult},
    models::user::{UpdateProfile, User},
};

impl Repository {
    /// Get user by ID
    pub async fn users_get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by username (case-insensitive)
    pub async fn users_get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Whether a username or email is already taken, optionally ignoring one user
    pub async fn users_exists(&self, username: Option<&str>, email: Option<&str>, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE (LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($2))
                  AND ($3::int IS NULL OR id != $3)
            )
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert a new account with an already hashed password
    pub async fn users_create(
        &self,
        conn: &mut PgConnection,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(conn)
        .await
        .map_err(|e| unique_violation(e, "Username or email already exists"))
    }

    /// Update own profile
    pub async fn users_update_profile(&self, id: i32, data: &UpdateProfile) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.first_name.trim())
        .bind(data.last_name.trim())
        .bind(data.email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "Email already in use"))?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }
}
