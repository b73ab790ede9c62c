//! Aggregates for the admin dashboard

use rust_decimal::Decimal;
use sqlx::FromRow;

use super::Repository;
use crate::error::AppResult;

#[derive(Debug, FromRow)]
pub struct DashboardRow {
    pub total_bookings: i64,
    pub total_revenue: Decimal,
    pub returned: i64,
    pub pending: i64,
    pub total_drivers: i64,
    pub total_vehicles: i64,
}

impl Repository {
    pub async fn stats_dashboard(&self) -> AppResult<DashboardRow> {
        let row = sqlx::query_as::<_, DashboardRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM bookings) AS total_bookings,
                (SELECT COALESCE(SUM(total_amount), 0) FROM bookings) AS total_revenue,
                (SELECT COUNT(*) FROM bookings WHERE is_returned = TRUE) AS returned,
                (SELECT COUNT(*) FROM bookings WHERE is_returned = FALSE) AS pending,
                (SELECT COUNT(*) FROM drivers) AS total_drivers,
                (SELECT COUNT(*) FROM vehicles) AS total_vehicles
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
