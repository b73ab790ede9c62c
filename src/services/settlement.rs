//! Return settlement: damage fee normalization and balance recomputation.
//!
//! A booking moves from active to returned exactly once. Staff may resubmit
//! damage details afterwards; the total is always rebuilt from the stored
//! base fare so a fee is never counted twice.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{Booking, NumericInput},
    services::fare::{check_amount, parse_non_negative, round_money},
};

/// Lifecycle of a booking with respect to the vehicle's return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnState {
    Active,
    Returned,
}

impl From<&Booking> for ReturnState {
    fn from(booking: &Booking) -> Self {
        if booking.is_returned {
            ReturnState::Returned
        } else {
            ReturnState::Active
        }
    }
}

/// Outcome of settling a booking at return time
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub damage_reported: bool,
    pub damage_fee: Decimal,
    pub total_amount: Decimal,
    pub pending_payment: Decimal,
    /// The fleet unit goes back to the pool with this settlement
    pub release_unit: bool,
    /// Return timestamp to store; the original one is kept on resubmission
    pub returned_at: DateTime<Utc>,
    pub previous_state: ReturnState,
}

/// Unparsable or negative fees read as 0.00; valid ones are rounded to cents.
pub fn parse_damage_fee(raw: Option<&NumericInput>) -> Decimal {
    raw.and_then(parse_non_negative)
        .map(round_money)
        .unwrap_or(Decimal::ZERO)
}

/// Settle a booking with the damage details reported by staff.
///
/// Fails with `InvalidAmount` when the fee or the new total would not fit a
/// money column; nothing is written in that case.
pub fn settle(
    booking: &Booking,
    damage_reported: bool,
    damage_fee: Decimal,
    now: DateTime<Utc>,
) -> AppResult<Settlement> {
    let previous_state = ReturnState::from(booking);
    let damage_fee = check_amount("damage_fee", round_money(damage_fee.max(Decimal::ZERO)))?;

    let total_amount = booking
        .base_amount
        .checked_add(damage_fee)
        .ok_or_else(|| AppError::InvalidAmount("total is too large".to_string()))?;
    let total_amount = check_amount("total", round_money(total_amount))?;
    let pending_payment = total_amount - booking.advance_payment;

    let (release_unit, returned_at) = match previous_state {
        ReturnState::Active => (true, now),
        ReturnState::Returned => (false, booking.returned_at.unwrap_or(now)),
    };

    Ok(Settlement {
        damage_reported,
        damage_fee,
        total_amount,
        pending_payment,
        release_unit,
        returned_at,
        previous_state,
    })
}

impl Settlement {
    /// Copy the settled fields onto an in-memory booking
    pub fn apply_to(&self, booking: &mut Booking) {
        booking.is_returned = true;
        booking.returned_at = Some(self.returned_at);
        booking.damage_reported = self.damage_reported;
        booking.damage_fee = self.damage_fee;
        booking.total_amount = self.total_amount;
        booking.pending_payment = self.pending_payment;
    }

    /// Damage details differ from what the returned booking already holds
    pub fn conflicts_with(&self, booking: &Booking) -> bool {
        self.previous_state == ReturnState::Returned
            && (booking.damage_reported != self.damage_reported || booking.damage_fee != self.damage_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DriveMode;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn booking(total: Decimal, advance: Decimal) -> Booking {
        let start = Utc::now();
        Booking {
            id: 1,
            customer_id: 10,
            vehicle_id: 3,
            start_datetime: start,
            expected_return_datetime: start + Duration::hours(10),
            actual_return_datetime: None,
            pickup_location: None,
            drop_location: None,
            night_halt: false,
            drive_mode: DriveMode::WithDriver,
            hours_used: 10,
            distance_km: Decimal::ZERO,
            start_km_reading: Some(0),
            end_km_reading: None,
            base_amount: total,
            total_amount: total,
            advance_payment: advance,
            pending_payment: total - advance,
            is_returned: false,
            returned_at: None,
            damage_reported: false,
            damage_fee: Decimal::ZERO,
            created_at: start,
        }
    }

    #[test]
    fn test_return_with_damage_fee() {
        let b = booking(dec!(1500.00), dec!(300.00));
        let fee = parse_damage_fee(Some(&NumericInput::Text("75.5".to_string())));
        let s = settle(&b, true, fee, Utc::now()).unwrap();

        assert_eq!(s.damage_fee, dec!(75.50));
        assert_eq!(s.total_amount, dec!(1575.50));
        assert_eq!(s.pending_payment, dec!(1275.50));
        assert!(s.release_unit);
        assert_eq!(s.previous_state, ReturnState::Active);
    }

    #[test]
    fn test_second_submission_is_idempotent() {
        let mut b = booking(dec!(1500.00), dec!(300.00));
        let first = settle(&b, true, dec!(75.50), Utc::now()).unwrap();
        first.apply_to(&mut b);

        let second = settle(&b, true, dec!(75.50), Utc::now()).unwrap();
        assert!(!second.release_unit);
        assert_eq!(second.total_amount, first.total_amount);
        assert_eq!(second.pending_payment, first.pending_payment);
        assert_eq!(second.returned_at, first.returned_at);
        assert!(!second.conflicts_with(&b));
    }

    #[test]
    fn test_resubmitted_fee_replaces_previous_one() {
        let mut b = booking(dec!(1500.00), dec!(300.00));
        settle(&b, true, dec!(75.50), Utc::now()).unwrap().apply_to(&mut b);

        let revised = settle(&b, true, dec!(20), Utc::now()).unwrap();
        assert!(revised.conflicts_with(&b));
        assert_eq!(revised.total_amount, dec!(1520.00));
        assert_eq!(revised.pending_payment, dec!(1220.00));
        assert!(!revised.release_unit);
    }

    #[test]
    fn test_return_without_damage() {
        let b = booking(dec!(400.00), dec!(80.00));
        let s = settle(&b, false, parse_damage_fee(None), Utc::now()).unwrap();
        assert_eq!(s.total_amount, dec!(400.00));
        assert_eq!(s.pending_payment, dec!(320.00));
        assert_eq!(s.pending_payment, s.total_amount - b.advance_payment);
    }

    #[test]
    fn test_oversized_damage_fee_is_rejected() {
        let b = booking(dec!(1500.00), dec!(300.00));

        let huge = parse_damage_fee(Some(&NumericInput::Text("79228162514264337593543950335".to_string())));
        assert!(matches!(settle(&b, true, huge, Utc::now()), Err(AppError::InvalidAmount(_))));

        let large = parse_damage_fee(Some(&NumericInput::Text("1000000000".to_string())));
        assert!(matches!(settle(&b, true, large, Utc::now()), Err(AppError::InvalidAmount(_))));

        // the fee alone fits, base + fee does not
        assert!(matches!(
            settle(&b, true, dec!(99999000), Utc::now()),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(settle(&b, true, dec!(99998499.99), Utc::now()).is_ok());
    }

    #[test]
    fn test_damage_fee_parsing_is_defensive() {
        assert_eq!(parse_damage_fee(Some(&NumericInput::Text("abc".to_string()))), Decimal::ZERO);
        assert_eq!(parse_damage_fee(Some(&NumericInput::Text("-10".to_string()))), Decimal::ZERO);
        assert_eq!(parse_damage_fee(Some(&NumericInput::Text("".to_string()))), Decimal::ZERO);
        assert_eq!(parse_damage_fee(Some(&NumericInput::Integer(-1))), Decimal::ZERO);
        assert_eq!(parse_damage_fee(Some(&NumericInput::Text("19.999".to_string()))), dec!(20.00));
        assert_eq!(parse_damage_fee(Some(&NumericInput::Integer(250))), dec!(250));
        assert_eq!(parse_damage_fee(Some(&NumericInput::Other(serde_json::Value::Bool(true)))), Decimal::ZERO);
    }
}
