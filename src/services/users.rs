//! Account registration, login and profile service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{LoginResponse, RegisterRequest, UpdateProfile, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create a customer account together with its (empty) customer profile
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if request.password1 != request.password2 {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }

        let username = request.username.trim();
        let email = request.email.trim();

        if self
            .repository
            .users_exists(Some(username), Some(email), None)
            .await?
        {
            return Err(AppError::Conflict("Username or email already exists".to_string()));
        }

        let password_hash = hash_password(&request.password1)?;

        let mut tx = self.repository.pool.begin().await?;
        let user = self
            .repository
            .users_create(&mut *tx, username, email, &password_hash)
            .await?;
        if !user.is_staff {
            self.repository.customers_ensure(&mut *tx, user.id).await?;
        }
        tx.commit().await?;

        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Authenticate by username and password and issue a bearer token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self
            .repository
            .users_get_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            tracing::warn!("Failed login attempt for {}", user.username);
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let claims = UserClaims::for_user(&user, self.config.jwt_expiration_hours);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("User {} logged in", user.username);

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.jwt_expiration_hours as i64 * 3600,
            user: user.into(),
        })
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users_get_by_id(id).await
    }

    /// Update own names and email
    pub async fn update_profile(&self, user_id: i32, data: &UpdateProfile) -> AppResult<User> {
        data.validate()?;
        if data.first_name.trim().is_empty() {
            return Err(AppError::Validation("First name is required".to_string()));
        }

        if self
            .repository
            .users_exists(None, Some(data.email.trim()), Some(user_id))
            .await?
        {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        self.repository.users_update_profile(user_id, data).await
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}
