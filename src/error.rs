//! Error types for Easy Rentals server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    BadValue = 5,
    Duplicate = 6,
    MissingCredentials = 7,
    FleetExhausted = 8,
    VehicleUnavailable = 9,
    UpstreamFailure = 10,
    UpstreamTimeout = 11,
}

/// Failures of the outbound distance matrix call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("Distance API key not configured")]
    NotConfigured,

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP Error: {0}")]
    HttpStatus(u16),

    #[error("API Error: {status}{}", details_suffix(.details))]
    ApiStatus {
        status: String,
        details: Option<String>,
    },

    #[error("Route calculation failed: {0}")]
    RouteNotFound(String),

    #[error("Invalid response from distance API: {0}")]
    InvalidResponse(String),
}

fn details_suffix(details: &Option<String>) -> String {
    details
        .as_ref()
        .map(|d| format!(" Details: {}", d))
        .unwrap_or_default()
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Identification and license numbers are required for self-drive bookings")]
    MissingCredentials,

    #[error("No units left for vehicle {0}")]
    FleetExhausted(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Distance lookup failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::InvalidAmount(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, self.to_string())
            }
            AppError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, ErrorCode::MissingCredentials, self.to_string())
            }
            AppError::FleetExhausted(_) => {
                (StatusCode::CONFLICT, ErrorCode::FleetExhausted, self.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::Upstream(UpstreamError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, ErrorCode::UpstreamTimeout, self.to_string())
            }
            AppError::Upstream(e) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::UpstreamFailure, e.to_string())
            }
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::VehicleUnavailable, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_status_message_includes_details() {
        let err = UpstreamError::ApiStatus {
            status: "REQUEST_DENIED".to_string(),
            details: Some("The provided API key is invalid.".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "API Error: REQUEST_DENIED Details: The provided API key is invalid."
        );

        let err = UpstreamError::ApiStatus {
            status: "OVER_QUERY_LIMIT".to_string(),
            details: None,
        };
        assert_eq!(err.to_string(), "API Error: OVER_QUERY_LIMIT");
    }

    #[test]
    fn test_status_codes() {
        let response = AppError::FleetExhausted(3).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::InvalidAmount("total too large".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Upstream(UpstreamError::Timeout).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let response = AppError::Upstream(UpstreamError::HttpStatus(500)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
