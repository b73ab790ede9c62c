//! Fare calculation for new bookings.
//!
//! Pure functions for pricing math - no database access. Money is rounded
//! with banker's rounding (round half to even) to 2 decimal places.

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::PricingConfig,
    error::{AppError, AppResult},
    models::{DriveMode, NumericInput, RateCard},
};

/// Rate rules shared by every vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct FareRules {
    /// Minimum billable block, in hours
    pub minimum_hours: i64,
    /// Flat amount added for `with_driver` bookings
    pub driver_surcharge: Decimal,
    /// Share of the total paid up front
    pub advance_rate: Decimal,
}

impl Default for FareRules {
    fn default() -> Self {
        Self::from(&PricingConfig::default())
    }
}

impl From<&PricingConfig> for FareRules {
    fn from(config: &PricingConfig) -> Self {
        Self {
            minimum_hours: config.minimum_hours,
            driver_surcharge: config.driver_surcharge,
            advance_rate: config.advance_rate,
        }
    }
}

/// Fare breakdown for one booking
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Fare {
    pub billed_hours: i64,
    pub distance_km: Decimal,
    pub hourly_amount: Decimal,
    pub km_amount: Decimal,
    pub minimum_base: Decimal,
    pub surcharge: Decimal,
    pub total: Decimal,
    pub advance: Decimal,
    pub pending: Decimal,
}

/// Identification and license numbers captured for a self-drive booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub id_number: String,
    pub license_number: String,
}

/// Largest amount a `NUMERIC(10,2)` money column holds (99,999,999.99)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Reject an amount the money columns cannot store.
pub fn check_amount(label: &str, amount: Decimal) -> AppResult<Decimal> {
    if amount > MAX_AMOUNT {
        return Err(AppError::InvalidAmount(format!(
            "{} exceeds {}",
            label, MAX_AMOUNT
        )));
    }
    Ok(amount)
}

fn overflow(label: &str) -> AppError {
    AppError::InvalidAmount(format!("{} is too large", label))
}

/// Round a money amount to 2 places using banker's rounding.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Read a lenient numeric field as a non-negative decimal.
///
/// Returns `None` for anything that is not a finite, non-negative number.
pub fn parse_non_negative(raw: &NumericInput) -> Option<Decimal> {
    let value = match raw {
        NumericInput::Integer(i) => Some(Decimal::from(*i)),
        NumericInput::Float(f) if f.is_finite() => Decimal::from_f64(*f),
        NumericInput::Float(_) => None,
        NumericInput::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        NumericInput::Other(_) => None,
    }?;

    if value < Decimal::ZERO {
        None
    } else {
        Some(value)
    }
}

/// Billed hours: integer coercion, defaulting to and floored at `minimum`.
pub fn parse_hours(raw: Option<&NumericInput>, minimum: i64) -> i64 {
    let hours = match raw {
        Some(NumericInput::Integer(i)) => *i,
        Some(NumericInput::Float(f)) if f.is_finite() => f.trunc() as i64,
        Some(NumericInput::Text(s)) => s.trim().parse::<i64>().unwrap_or(minimum),
        _ => minimum,
    };
    hours.max(minimum)
}

/// Trip distance in km; invalid, negative or missing input reads as zero.
pub fn parse_distance(raw: Option<&NumericInput>) -> Decimal {
    raw.and_then(parse_non_negative)
        .map(round_money)
        .unwrap_or(Decimal::ZERO)
}

/// Self-drive bookings need both numbers; driver bookings need neither.
pub fn check_credentials(
    mode: DriveMode,
    id_number: Option<&str>,
    license_number: Option<&str>,
) -> AppResult<Option<Credentials>> {
    if mode != DriveMode::SelfDrive {
        return Ok(None);
    }

    let id_number = id_number.map(str::trim).unwrap_or_default();
    let license_number = license_number.map(str::trim).unwrap_or_default();

    if id_number.is_empty() || license_number.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    Ok(Some(Credentials {
        id_number: id_number.to_string(),
        license_number: license_number.to_string(),
    }))
}

/// Compute total, advance and pending amounts for a trip.
///
/// The total is the largest of the hourly amount, the distance amount and
/// the minimum block, plus the driver surcharge when applicable. `pending`
/// is always `total - advance`, so the two add up exactly. Trips whose
/// distance or total do not fit a money column fail with `InvalidAmount`.
pub fn compute_fare(
    rates: &RateCard,
    mode: DriveMode,
    hours_used: i64,
    distance_km: Decimal,
    rules: &FareRules,
) -> AppResult<Fare> {
    let billed_hours = hours_used.max(rules.minimum_hours);
    let distance_km = check_amount("distance_km", distance_km.max(Decimal::ZERO))?;

    let hourly_amount = rates
        .per_hour
        .checked_mul(Decimal::from(billed_hours))
        .ok_or_else(|| overflow("hourly amount"))?;
    let km_amount = rates
        .per_km
        .checked_mul(distance_km)
        .ok_or_else(|| overflow("distance amount"))?;
    let minimum_base = rates
        .per_hour
        .checked_mul(Decimal::from(rules.minimum_hours))
        .ok_or_else(|| overflow("minimum amount"))?;

    let surcharge = match mode {
        DriveMode::WithDriver => rules.driver_surcharge,
        DriveMode::SelfDrive => Decimal::ZERO,
    };

    let total = hourly_amount
        .max(km_amount)
        .max(minimum_base)
        .max(Decimal::ZERO)
        .checked_add(surcharge)
        .ok_or_else(|| overflow("total"))?;
    let total = check_amount("total", round_money(total))?;
    let advance = round_money(
        total
            .checked_mul(rules.advance_rate)
            .ok_or_else(|| overflow("advance"))?,
    );
    let pending = total - advance;

    Ok(Fare {
        billed_hours,
        distance_km,
        hourly_amount: round_money(hourly_amount),
        km_amount: round_money(km_amount),
        minimum_base: round_money(minimum_base),
        surcharge,
        total,
        advance,
        pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn rates() -> RateCard {
        RateCard {
            per_hour: dec!(100),
            per_km: dec!(10),
        }
    }

    #[test]
    fn test_short_self_drive_trip_bills_minimum_block() {
        let fare = compute_fare(&rates(), DriveMode::SelfDrive, 3, dec!(20), &FareRules::default()).unwrap();
        assert_eq!(fare.billed_hours, 4);
        assert_eq!(fare.hourly_amount, dec!(400));
        assert_eq!(fare.km_amount, dec!(200));
        assert_eq!(fare.minimum_base, dec!(400));
        assert_eq!(fare.total, dec!(400.00));
        assert_eq!(fare.advance, dec!(80.00));
        assert_eq!(fare.pending, dec!(320.00));
    }

    #[test]
    fn test_with_driver_adds_surcharge() {
        let fare = compute_fare(&rates(), DriveMode::WithDriver, 10, dec!(20), &FareRules::default()).unwrap();
        assert_eq!(fare.hourly_amount, dec!(1000));
        assert_eq!(fare.total, dec!(1500.00));
        assert_eq!(fare.advance, dec!(300.00));
        assert_eq!(fare.pending, dec!(1200.00));
    }

    #[test]
    fn test_distance_amount_wins_for_long_trips() {
        let fare = compute_fare(&rates(), DriveMode::SelfDrive, 5, dec!(120.5), &FareRules::default()).unwrap();
        assert_eq!(fare.km_amount, dec!(1205.00));
        assert_eq!(fare.total, dec!(1205.00));
        assert_eq!(fare.advance, dec!(241.00));
        assert_eq!(fare.pending, dec!(964.00));
    }

    #[test]
    fn test_surcharge_difference_is_exact() {
        let rules = FareRules::default();
        let card = RateCard {
            per_hour: dec!(87.35),
            per_km: dec!(11.15),
        };
        for (hours, km) in [(1, dec!(0)), (4, dec!(33.33)), (9, dec!(7)), (26, dec!(410.75))] {
            let self_drive = compute_fare(&card, DriveMode::SelfDrive, hours, km, &rules).unwrap();
            let with_driver = compute_fare(&card, DriveMode::WithDriver, hours, km, &rules).unwrap();
            assert_eq!(with_driver.total - self_drive.total, dec!(500.00));
        }
    }

    #[test]
    fn test_advance_and_pending_add_up() {
        let rules = FareRules::default();
        let card = RateCard {
            per_hour: dec!(33.33),
            per_km: dec!(7.77),
        };
        for hours in [4, 7, 13] {
            for km in [dec!(0), dec!(1.11), dec!(99.99), dec!(250.37)] {
                let fare = compute_fare(&card, DriveMode::SelfDrive, hours, km, &rules).unwrap();
                assert_eq!(fare.advance + fare.pending, fare.total);
                assert!(fare.total.scale() <= 2);
            }
        }
    }

    #[test]
    fn test_round_money_is_half_even() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.34));
        assert_eq!(round_money(dec!(2.355)), dec!(2.36));
        assert_eq!(round_money(dec!(1.2349)), dec!(1.23));
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours(None, 4), 4);
        assert_eq!(parse_hours(Some(&NumericInput::Integer(2)), 4), 4);
        assert_eq!(parse_hours(Some(&NumericInput::Integer(10)), 4), 10);
        assert_eq!(parse_hours(Some(&NumericInput::Float(6.9)), 4), 6);
        assert_eq!(parse_hours(Some(&NumericInput::Text(" 12 ".to_string())), 4), 12);
        assert_eq!(parse_hours(Some(&NumericInput::Text("abc".to_string())), 4), 4);
        assert_eq!(parse_hours(Some(&NumericInput::Integer(-5)), 4), 4);
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(parse_distance(None), Decimal::ZERO);
        assert_eq!(parse_distance(Some(&NumericInput::Text("42.5".to_string()))), dec!(42.5));
        assert_eq!(parse_distance(Some(&NumericInput::Float(12.344))), dec!(12.34));
        assert_eq!(parse_distance(Some(&NumericInput::Integer(-3))), Decimal::ZERO);
        assert_eq!(parse_distance(Some(&NumericInput::Text("far".to_string()))), Decimal::ZERO);
        assert_eq!(parse_distance(Some(&NumericInput::Float(f64::NAN))), Decimal::ZERO);
    }

    #[test]
    fn test_max_amount_matches_money_columns() {
        assert_eq!(MAX_AMOUNT, dec!(99999999.99));
        assert!(check_amount("total", dec!(99999999.99)).is_ok());
        assert!(matches!(
            check_amount("total", dec!(100000000.00)),
            Err(AppError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_oversized_distance_is_rejected() {
        let rules = FareRules::default();

        let huge = parse_distance(Some(&NumericInput::Text("79228162514264337593543950335".to_string())));
        assert!(matches!(
            compute_fare(&rates(), DriveMode::SelfDrive, 4, huge, &rules),
            Err(AppError::InvalidAmount(_))
        ));

        let far = parse_distance(Some(&NumericInput::Text("1000000000".to_string())));
        assert!(matches!(
            compute_fare(&rates(), DriveMode::SelfDrive, 4, far, &rules),
            Err(AppError::InvalidAmount(_))
        ));

        // fits the distance column, but 10/km pushes the total past it
        assert!(matches!(
            compute_fare(&rates(), DriveMode::SelfDrive, 4, dec!(10000000), &rules),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(compute_fare(&rates(), DriveMode::SelfDrive, 4, dec!(9999999.99), &rules).is_ok());
    }

    #[test]
    fn test_oversized_hours_are_rejected() {
        let card = RateCard {
            per_hour: Decimal::MAX,
            per_km: dec!(10),
        };
        assert!(matches!(
            compute_fare(&card, DriveMode::SelfDrive, i64::MAX, dec!(0), &FareRules::default()),
            Err(AppError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_non_numeric_json_reads_as_invalid() {
        for raw in [json!(true), json!({}), json!([1, 2]), json!(null)] {
            let input: NumericInput = serde_json::from_value(raw).unwrap();
            assert!(matches!(input, NumericInput::Other(_)));
            assert_eq!(parse_distance(Some(&input)), Decimal::ZERO);
            assert_eq!(parse_hours(Some(&input), 4), 4);
        }
    }

    #[test]
    fn test_self_drive_requires_both_numbers() {
        assert!(matches!(
            check_credentials(DriveMode::SelfDrive, Some("123412341234"), None),
            Err(AppError::MissingCredentials)
        ));
        assert!(matches!(
            check_credentials(DriveMode::SelfDrive, Some("  "), Some("DL-01")),
            Err(AppError::MissingCredentials)
        ));

        let credentials = check_credentials(DriveMode::SelfDrive, Some(" 123412341234 "), Some("DL-01"))
            .unwrap()
            .unwrap();
        assert_eq!(credentials.id_number, "123412341234");
        assert_eq!(credentials.license_number, "DL-01");

        assert!(check_credentials(DriveMode::WithDriver, None, None).unwrap().is_none());
    }
}
