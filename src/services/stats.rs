//! Admin dashboard figures

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub total_bookings: i64,
    /// Sum of booking totals, damage fees included
    pub total_revenue: Decimal,
    pub total_drivers: i64,
    pub total_vehicles: i64,
    pub returned: i64,
    pub pending: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        let row = self.repository.stats_dashboard().await?;
        Ok(Dashboard {
            total_bookings: row.total_bookings,
            total_revenue: row.total_revenue,
            total_drivers: row.total_drivers,
            total_vehicles: row.total_vehicles,
            returned: row.returned,
            pending: row.pending,
        })
    }

    /// Database round-trip for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
