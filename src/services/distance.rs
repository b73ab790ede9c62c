//! Trip distance and fare estimation through a distance matrix API

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::DistanceConfig,
    error::{AppError, AppResult, UpstreamError},
    services::fare::round_money,
};

/// Human readable text plus the raw value (meters or seconds)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

/// The single origin/destination cell of a matrix response
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceElement {
    pub distance: TextValue,
    pub duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

/// Route lookup between two free-text addresses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistanceMatrix: Send + Sync {
    async fn lookup(&self, origin: &str, destination: &str) -> Result<DistanceElement, UpstreamError>;
}

/// Google Distance Matrix client
pub struct GoogleDistanceMatrix {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl GoogleDistanceMatrix {
    pub fn new(config: &DistanceConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }
}

#[async_trait]
impl DistanceMatrix for GoogleDistanceMatrix {
    async fn lookup(&self, origin: &str, destination: &str) -> Result<DistanceElement, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::NotConfigured)?;

        tracing::debug!(origin, destination, url = %self.api_url, "Requesting distance matrix");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("units", "metric"),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        tracing::debug!("Distance matrix response status: {}", status);

        if !status.is_success() {
            return Err(UpstreamError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let parsed: MatrixResponse = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        interpret_response(parsed)
    }
}

fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout
    } else if error.is_connect() {
        UpstreamError::Connection(error.to_string())
    } else {
        UpstreamError::InvalidResponse(error.to_string())
    }
}

fn interpret_response(response: MatrixResponse) -> Result<DistanceElement, UpstreamError> {
    if response.status != "OK" {
        return Err(UpstreamError::ApiStatus {
            details: response.error_message,
            status: response.status,
        });
    }

    let element = response
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| UpstreamError::InvalidResponse("empty distance matrix".to_string()))?;

    match element.status.as_str() {
        "OK" => {}
        "NOT_FOUND" => {
            return Err(UpstreamError::RouteNotFound(
                "One or both locations could not be found".to_string(),
            ))
        }
        "ZERO_RESULTS" => {
            return Err(UpstreamError::RouteNotFound(
                "No route could be found between these locations".to_string(),
            ))
        }
        other => return Err(UpstreamError::RouteNotFound(other.to_string())),
    }

    match (element.distance, element.duration) {
        (Some(distance), Some(duration)) => Ok(DistanceElement { distance, duration }),
        _ => Err(UpstreamError::InvalidResponse(
            "route element without distance or duration".to_string(),
        )),
    }
}

/// Estimate request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DistanceRequest {
    pub origin: String,
    pub destination: String,
}

/// Route figures and the resulting fare estimate
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DistanceEstimate {
    pub success: bool,
    pub distance: String,
    pub duration: String,
    pub distance_km: Decimal,
    pub duration_hours: Decimal,
    pub distance_fare: Decimal,
    pub time_fare: Decimal,
    pub estimated_fare: Decimal,
    pub origin: String,
    pub destination: String,
}

#[derive(Clone)]
pub struct DistanceService {
    matrix: Arc<dyn DistanceMatrix>,
    fare_per_km: Decimal,
    fare_per_hour: Decimal,
}

impl DistanceService {
    pub fn new(matrix: Arc<dyn DistanceMatrix>, config: &DistanceConfig) -> Self {
        Self {
            matrix,
            fare_per_km: config.fare_per_km,
            fare_per_hour: config.fare_per_hour,
        }
    }

    /// Look up the route and price it by distance and by time, keeping the larger.
    pub async fn estimate(&self, origin: &str, destination: &str) -> AppResult<DistanceEstimate> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(AppError::Validation(
                "Both origin and destination are required".to_string(),
            ));
        }

        tracing::info!("Distance estimate requested: {} -> {}", origin, destination);

        let element = self
            .matrix
            .lookup(origin, destination)
            .await
            .map_err(|e| {
                tracing::warn!("Distance lookup failed for {} -> {}: {}", origin, destination, e);
                AppError::Upstream(e)
            })?;

        let distance_km = Decimal::from(element.distance.value) / Decimal::from(1000);
        let duration_hours = Decimal::from(element.duration.value) / Decimal::from(3600);
        let distance_fare = distance_km * self.fare_per_km;
        let time_fare = duration_hours * self.fare_per_hour;
        let estimated_fare = distance_fare.max(time_fare);

        Ok(DistanceEstimate {
            success: true,
            distance: element.distance.text,
            duration: element.duration.text,
            distance_km: round_money(distance_km),
            duration_hours: round_money(duration_hours),
            distance_fare: round_money(distance_fare),
            time_fare: round_money(time_fare),
            estimated_fare: round_money(estimated_fare),
            origin: origin.to_string(),
            destination: destination.to_string(),
        })
    }
}
