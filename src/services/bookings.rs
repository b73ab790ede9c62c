//! Booking lifecycle: creation with fleet reservation, listings and returns

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingList, CreateBooking, FareQuoteRequest, MarkReturned},
        Booking, BookingDetails, NewBooking, ReturnOutcome, UserClaims, VehicleStatus,
    },
    repository::Repository,
    services::{
        fare::{check_credentials, compute_fare, parse_distance, parse_hours, Fare, FareRules},
        settlement::{parse_damage_fee, settle, ReturnState},
    },
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    rules: FareRules,
}

impl BookingsService {
    pub fn new(repository: Repository, rules: FareRules) -> Self {
        Self { repository, rules }
    }

    /// Create a booking for `customer_id`.
    ///
    /// Credentials are checked before anything else and the fare is priced
    /// before any write. One fleet unit is then reserved and the booking is
    /// stored in a single transaction.
    pub async fn create(&self, customer_id: i32, request: &CreateBooking) -> AppResult<Booking> {
        let credentials = check_credentials(
            request.drive_mode,
            request.id_number.as_deref(),
            request.license_number.as_deref(),
        )?;

        request.validate()?;

        if request.expected_return_datetime <= request.start_datetime {
            return Err(AppError::Validation(
                "Expected return must be after the start of the rental".to_string(),
            ));
        }

        let vehicle = self.repository.vehicles_get_by_id(request.vehicle_id).await?;
        if vehicle.status == VehicleStatus::Repair {
            return Err(AppError::BusinessRule(format!(
                "Vehicle {} is under repair",
                vehicle.id
            )));
        }

        let hours = parse_hours(request.hours_used.as_ref(), self.rules.minimum_hours);
        let distance_km = parse_distance(request.distance_km.as_ref());

        // Priced before any write
        let fare = compute_fare(
            &vehicle.rate_card(),
            request.drive_mode,
            hours,
            distance_km,
            &self.rules,
        )?;
        let hours_used = i32::try_from(fare.billed_hours)
            .map_err(|_| AppError::InvalidAmount("hours_used is out of range".to_string()))?;

        let mut tx = self.repository.pool.begin().await?;

        let reserved = self
            .repository
            .vehicles_reserve_unit(&mut *tx, vehicle.id)
            .await
            .map_err(|e| {
                if let AppError::FleetExhausted(id) = e {
                    tracing::warn!("Booking refused for customer {}: vehicle {} fully booked", customer_id, id);
                }
                e
            })?;

        if let Some(credentials) = &credentials {
            self.repository
                .customers_store_credentials(&mut *tx, customer_id, credentials)
                .await?;
        }

        let booking = self
            .repository
            .bookings_insert(
                &mut *tx,
                &NewBooking {
                    customer_id,
                    vehicle_id: reserved.id,
                    start_datetime: request.start_datetime,
                    expected_return_datetime: request.expected_return_datetime,
                    pickup_location: request.pickup_location.clone(),
                    drop_location: request.drop_location.clone(),
                    night_halt: request.night_halt.unwrap_or(false),
                    drive_mode: request.drive_mode,
                    hours_used,
                    distance_km: fare.distance_km,
                    start_km_reading: request.start_km_reading,
                    base_amount: fare.total,
                    advance_payment: fare.advance,
                    pending_payment: fare.pending,
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Booking {} created: vehicle {} for customer {}, total {} (advance {}), {} units left",
            booking.id,
            reserved.id,
            customer_id,
            booking.total_amount,
            booking.advance_payment,
            reserved.total_cars
        );

        Ok(booking)
    }

    /// Price a trip without reserving anything
    pub async fn fare_quote(&self, request: &FareQuoteRequest) -> AppResult<Fare> {
        let vehicle = self.repository.vehicles_get_by_id(request.vehicle_id).await?;
        let hours = parse_hours(request.hours_used.as_ref(), self.rules.minimum_hours);
        let distance_km = parse_distance(request.distance_km.as_ref());
        compute_fare(
            &vehicle.rate_card(),
            request.drive_mode,
            hours,
            distance_km,
            &self.rules,
        )
    }

    /// Staff see every active booking, customers their own bookings
    pub async fn list_for(&self, claims: &UserClaims) -> AppResult<BookingList> {
        if claims.require_staff().is_ok() {
            return self.list_active().await;
        }

        let bookings = self.repository.bookings_list_for_customer(claims.user_id).await?;
        let (total_booked, total_returned) = self
            .repository
            .bookings_count_by_state(Some(claims.user_id))
            .await?;

        Ok(BookingList {
            bookings,
            total_booked,
            total_returned,
        })
    }

    /// Active bookings of the whole fleet with global counters
    pub async fn list_active(&self) -> AppResult<BookingList> {
        let bookings = self.repository.bookings_list_active(None).await?;
        let (total_booked, total_returned) = self.repository.bookings_count_by_state(None).await?;

        Ok(BookingList {
            bookings,
            total_booked,
            total_returned,
        })
    }

    /// Returned bookings, optionally for a single customer
    pub async fn list_returned(&self, customer_id: Option<i32>) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings_list_returned(customer_id).await
    }

    /// Get one booking; customers may only read their own
    pub async fn get(&self, id: i32, claims: &UserClaims) -> AppResult<BookingDetails> {
        let details = self.repository.bookings_get_details(id).await?;
        claims.require_owner_or_staff(details.booking.customer_id)?;
        Ok(details)
    }

    /// Mark a booking returned with the damage details reported by staff.
    ///
    /// The booking row is locked for the whole settlement, so the fleet unit
    /// is released at most once even when two submissions race.
    pub async fn mark_returned(&self, id: i32, form: &MarkReturned) -> AppResult<ReturnOutcome> {
        let damage_fee = parse_damage_fee(form.damage_fee.as_ref());

        let mut tx = self.repository.pool.begin().await?;
        let booking = self.repository.bookings_lock(&mut *tx, id).await?;

        let settlement = settle(&booking, form.damage_reported, damage_fee, Utc::now())?;

        if settlement.conflicts_with(&booking) {
            tracing::warn!(
                "Booking {} already returned; replacing damage details (fee {} -> {})",
                id,
                booking.damage_fee,
                settlement.damage_fee
            );
        }

        if settlement.release_unit {
            self.repository
                .vehicles_release_unit(&mut *tx, booking.vehicle_id)
                .await?;
        }

        let updated = self
            .repository
            .bookings_apply_settlement(&mut *tx, id, &settlement, form.end_km_reading)
            .await?;

        tx.commit().await?;

        let status = match settlement.previous_state {
            ReturnState::Active => {
                tracing::info!(
                    "Booking {} returned: vehicle {} released, total {}, pending {}",
                    id,
                    updated.vehicle_id,
                    updated.total_amount,
                    updated.pending_payment
                );
                "returned"
            }
            ReturnState::Returned => "already_returned",
        };

        Ok(ReturnOutcome {
            status: status.to_string(),
            booking: updated,
        })
    }

    /// Mark an active booking returned keeping its stored damage details.
    /// A booking that is already returned is left untouched.
    pub async fn quick_return(&self, id: i32) -> AppResult<ReturnOutcome> {
        let mut tx = self.repository.pool.begin().await?;
        let booking = self.repository.bookings_lock(&mut *tx, id).await?;

        if ReturnState::from(&booking) == ReturnState::Returned {
            tx.rollback().await?;
            tracing::info!("Quick return ignored: booking {} already returned", id);
            return Ok(ReturnOutcome {
                status: "already_returned".to_string(),
                booking,
            });
        }

        let settlement = settle(&booking, booking.damage_reported, booking.damage_fee, Utc::now())?;
        self.repository
            .vehicles_release_unit(&mut *tx, booking.vehicle_id)
            .await?;
        let updated = self
            .repository
            .bookings_apply_settlement(&mut *tx, id, &settlement, None)
            .await?;

        tx.commit().await?;

        tracing::info!("Booking {} quick-returned, vehicle {} released", id, updated.vehicle_id);

        Ok(ReturnOutcome {
            status: "returned".to_string(),
            booking: updated,
        })
    }
}
