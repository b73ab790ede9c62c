//! Booking domain methods on Repository

use sqlx::PgConnection;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingDetails, NewBooking},
    services::settlement::Settlement,
};

const DETAILS_SELECT: &str = r#"
    SELECT b.*,
           v.category AS vehicle_category,
           v.registration_number AS vehicle_registration,
           u.username AS customer_username
    FROM bookings b
    JOIN vehicles v ON v.id = b.vehicle_id
    JOIN users u ON u.id = b.customer_id
"#;

impl Repository {
    /// Insert a priced booking. The fare at creation is both the base and the total.
    pub async fn bookings_insert(&self, conn: &mut PgConnection, data: &NewBooking) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (customer_id, vehicle_id, start_datetime, expected_return_datetime,
                                  pickup_location, drop_location, night_halt, drive_mode,
                                  hours_used, distance_km, start_km_reading,
                                  base_amount, total_amount, advance_payment, pending_payment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(data.customer_id)
        .bind(data.vehicle_id)
        .bind(data.start_datetime)
        .bind(data.expected_return_datetime)
        .bind(&data.pickup_location)
        .bind(&data.drop_location)
        .bind(data.night_halt)
        .bind(data.drive_mode)
        .bind(data.hours_used)
        .bind(data.distance_km)
        .bind(data.start_km_reading)
        .bind(data.base_amount)
        .bind(data.advance_payment)
        .bind(data.pending_payment)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    /// Get booking with vehicle and customer labels
    pub async fn bookings_get_details(&self, id: i32) -> AppResult<BookingDetails> {
        let query = format!("{} WHERE b.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, BookingDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Lock a booking row for the rest of the transaction
    pub async fn bookings_lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Persist the return settlement of a booking
    pub async fn bookings_apply_settlement(
        &self,
        conn: &mut PgConnection,
        id: i32,
        settlement: &Settlement,
        end_km_reading: Option<i32>,
    ) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET is_returned = TRUE,
                returned_at = $2,
                actual_return_datetime = COALESCE(actual_return_datetime, $2),
                damage_reported = $3,
                damage_fee = $4,
                total_amount = $5,
                pending_payment = $6,
                end_km_reading = COALESCE($7, end_km_reading)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(settlement.returned_at)
        .bind(settlement.damage_reported)
        .bind(settlement.damage_fee)
        .bind(settlement.total_amount)
        .bind(settlement.pending_payment)
        .bind(end_km_reading)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    /// Bookings not yet returned, newest start first. `customer_id` narrows to one customer.
    pub async fn bookings_list_active(&self, customer_id: Option<i32>) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.is_returned = FALSE AND ($1::int IS NULL OR b.customer_id = $1) \
             ORDER BY b.start_datetime DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Returned bookings, most recent return first
    pub async fn bookings_list_returned(&self, customer_id: Option<i32>) -> AppResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.is_returned = TRUE AND ($1::int IS NULL OR b.customer_id = $1) \
             ORDER BY b.returned_at DESC NULLS LAST",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Every booking of one customer, latest start first
    pub async fn bookings_list_for_customer(&self, customer_id: i32) -> AppResult<Vec<BookingDetails>> {
        let query = format!("{} WHERE b.customer_id = $1 ORDER BY b.start_datetime DESC", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// (active, returned) booking counts
    pub async fn bookings_count_by_state(&self, customer_id: Option<i32>) -> AppResult<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE is_returned = FALSE),
                   COUNT(*) FILTER (WHERE is_returned = TRUE)
            FROM bookings
            WHERE $1::int IS NULL OR customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
