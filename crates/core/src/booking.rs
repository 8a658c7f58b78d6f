//! Availability and pricing rules for reservations.
//!
//! Everything here is a pure function of its inputs: the repository layer
//! decides *which* reservations exist, this module decides whether a
//! requested interval is bookable against a space's policy and what it
//! costs. The caller supplies `now` so boundary behaviour is testable.

use chrono::Months;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, Timestamp};

/// How a space charges for time.
///
/// Spaces store the unit as free-form text; unknown values parse to `None`
/// and are priced as hourly with no minimum-stay check applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingUnit {
    Hour,
    Day,
    Event,
}

impl PricingUnit {
    /// Case-insensitive parse of the stored unit text.
    pub fn parse(raw: &str) -> Option<PricingUnit> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hour" => Some(PricingUnit::Hour),
            "day" => Some(PricingUnit::Day),
            "event" => Some(PricingUnit::Event),
            _ => None,
        }
    }
}

/// Booking-policy fields of a space that constrain the requested interval.
/// All limits are optional; an unset limit is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingPolicy {
    /// Minimum hours between "now" and the start of the reservation.
    pub min_notice_hours: Option<i32>,
    /// Minimum stay; days for day-priced spaces, hours for hour-priced ones.
    pub min_stay: Option<i32>,
    /// Reservations may not end later than this many months from now.
    pub max_lead_months: Option<i32>,
}

/// A booking request rejected by the space's policy.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("The requested date range is not valid.")]
    InvalidRange,

    #[error("Bookings for this space require at least {required_hours} hours of notice.")]
    InsufficientNotice { required_hours: i32 },

    #[error("The minimum stay for this space is {required} {unit}.")]
    StayTooShort { required: i32, unit: &'static str },

    #[error("Bookings cannot be made more than {max_months} months in advance.")]
    LeadTimeExceeded { max_months: i32 },
}

/// Validate a requested interval against a space's booking policy.
///
/// Checks run in order and short-circuit on the first failure:
/// range validity, minimum notice, minimum stay, maximum lead time.
pub fn validate_interval(
    unit: Option<PricingUnit>,
    policy: &BookingPolicy,
    start: Timestamp,
    end: Timestamp,
    now: Timestamp,
) -> Result<(), PolicyError> {
    if end <= start {
        return Err(PolicyError::InvalidRange);
    }

    if let Some(required_hours) = policy.min_notice_hours {
        // Whole hours only: 23h59m of notice does not satisfy a 24h minimum.
        let notice_hours = (start - now).num_hours();
        if notice_hours < i64::from(required_hours) {
            return Err(PolicyError::InsufficientNotice { required_hours });
        }
    }

    if let Some(required) = policy.min_stay {
        match unit {
            Some(PricingUnit::Day) => {
                let days = calendar_days(start, end).max(1);
                if days < i64::from(required) {
                    return Err(PolicyError::StayTooShort {
                        required,
                        unit: "days",
                    });
                }
            }
            Some(PricingUnit::Hour) => {
                let hours = (end - start).num_hours();
                if hours < i64::from(required) {
                    return Err(PolicyError::StayTooShort {
                        required,
                        unit: "hours",
                    });
                }
            }
            // Event-priced and unknown units carry no minimum-stay semantics.
            _ => {}
        }
    }

    if let Some(max_months) = policy.max_lead_months {
        if let Some(horizon) = now.checked_add_months(Months::new(max_months.max(0) as u32)) {
            if end > horizon {
                return Err(PolicyError::LeadTimeExceeded { max_months });
            }
        }
    }

    Ok(())
}

/// Half-open interval overlap: `a.start < b.end && a.end > b.start`.
/// Touching endpoints (one ends exactly when the other starts) do not overlap.
pub fn intervals_overlap(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Compute the total price for an interval from the space's base price.
///
/// - Day: `max(1, calendar days between start and end) * base`
/// - Event: flat `base`
/// - Hour (and unknown units): `round(minutes / 60, 2) * base`
///
/// All results are rounded half-up to 2 decimal places. The weekend price a
/// space may carry is intentionally not read here (see DESIGN.md).
pub fn total_price(
    unit: Option<PricingUnit>,
    base_price: Money,
    start: Timestamp,
    end: Timestamp,
) -> Money {
    match unit {
        Some(PricingUnit::Day) => {
            let days = calendar_days(start, end).max(1);
            round_money(base_price * Decimal::from(days))
        }
        Some(PricingUnit::Event) => round_money(base_price),
        Some(PricingUnit::Hour) | None => {
            let minutes = (end - start).num_minutes();
            let hours = round_money(Decimal::from(minutes) / Decimal::from(60));
            round_money(base_price * hours)
        }
    }
}

/// Round a monetary amount half-up to 2 decimal places.
pub fn round_money(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole calendar days between the start date and the end date.
fn calendar_days(start: Timestamp, end: Timestamp) -> i64 {
    (end.date_naive() - start.date_naive()).num_days()
}
