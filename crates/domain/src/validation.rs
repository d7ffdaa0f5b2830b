// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary validation for booking and wallet requests.
//!
//! All checks here run before any mutation. The fare calculator itself is
//! pure and unchecked; these functions are the authoritative gate in front
//! of it.

use crate::error::DomainError;
use crate::station::Station;
use time::macros::time;
use time::{Date, OffsetDateTime, Time};

/// Minimum tickets per checkout.
pub const MIN_QUANTITY: u32 = 1;

/// Maximum tickets per checkout.
pub const MAX_QUANTITY: u32 = 10;

/// First departure time accepted for scheduled travel.
pub const OPERATING_OPEN: Time = time!(7:00);

/// Last departure time accepted for scheduled travel.
pub const OPERATING_CLOSE: Time = time!(22:00);

/// Scheduled travel may be booked at most this many days ahead.
pub const MAX_SCHEDULE_DAYS_AHEAD: i64 = 30;

/// Tolerance when comparing a caller-declared fare to the computed fare.
const FARE_EPSILON: f64 = 0.01;

/// Validates that origin and destination differ.
///
/// # Errors
///
/// Returns `DomainError::SameStationRoute` if they are the same station.
pub fn validate_route(from: Station, to: Station) -> Result<(), DomainError> {
    if from == to {
        return Err(DomainError::SameStationRoute(from));
    }
    Ok(())
}

/// Validates that the ticket quantity is within [1, 10].
///
/// # Errors
///
/// Returns `DomainError::InvalidQuantity` if out of range.
pub fn validate_quantity(quantity: u32) -> Result<(), DomainError> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        return Err(DomainError::InvalidQuantity {
            quantity,
            min: MIN_QUANTITY,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates that the caller-declared total fare matches the computed
/// total within a small tolerance.
///
/// # Errors
///
/// Returns `DomainError::FareMismatch` if the declared fare is off by
/// more than 0.01.
pub fn validate_declared_fare(declared: f64, computed: u32) -> Result<(), DomainError> {
    if (declared - f64::from(computed)).abs() > FARE_EPSILON {
        return Err(DomainError::FareMismatch { declared, computed });
    }
    Ok(())
}

/// Validates a scheduled booking's travel date and time of day.
///
/// The time of day must fall within operating hours, and the date must be
/// today or within the booking horizon. Both checks are enforced here even
/// though the UI applies them too; the service boundary is authoritative.
///
/// # Errors
///
/// Returns `DomainError::InvalidTravelTime` or
/// `DomainError::TravelDateOutOfRange`.
pub fn validate_travel_schedule(
    travel_date: Date,
    travel_time: Time,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if travel_time < OPERATING_OPEN || travel_time > OPERATING_CLOSE {
        return Err(DomainError::InvalidTravelTime {
            requested: travel_time,
        });
    }

    let days_ahead = (travel_date - now.date()).whole_days();
    if days_ahead < 0 || days_ahead > MAX_SCHEDULE_DAYS_AHEAD {
        return Err(DomainError::TravelDateOutOfRange {
            requested: travel_date,
            max_days_ahead: MAX_SCHEDULE_DAYS_AHEAD,
        });
    }

    Ok(())
}

/// Validates a wallet payment's amount and method.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` for a non-positive amount or
/// `DomainError::InvalidPaymentMethod` for an empty method.
pub fn validate_payment(amount: i64, method: &str) -> Result<(), DomainError> {
    if amount <= 0 {
        return Err(DomainError::InvalidAmount {
            amount,
            reason: "payment amount must be positive".to_string(),
        });
    }
    if method.trim().is_empty() {
        return Err(DomainError::InvalidPaymentMethod);
    }
    Ok(())
}
