// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Station, validate_declared_fare, validate_payment, validate_quantity,
    validate_route, validate_travel_schedule,
};
use time::Duration;
use time::macros::{datetime, time};

const NOW: time::OffsetDateTime = datetime!(2026-03-02 10:00 UTC);

#[test]
fn test_validate_route_accepts_distinct_stations() {
    let result = validate_route(Station::UttaraNorth, Station::Motijheel);
    assert!(result.is_ok());
}

#[test]
fn test_validate_route_rejects_same_station() {
    let result = validate_route(Station::Farmgate, Station::Farmgate);
    assert!(matches!(result, Err(DomainError::SameStationRoute(_))));
}

#[test]
fn test_validate_quantity_accepts_full_range() {
    for quantity in 1..=10 {
        assert!(validate_quantity(quantity).is_ok());
    }
}

#[test]
fn test_validate_quantity_rejects_zero() {
    let result = validate_quantity(0);
    assert!(matches!(result, Err(DomainError::InvalidQuantity { .. })));
}

#[test]
fn test_validate_quantity_rejects_eleven() {
    let result = validate_quantity(11);
    assert!(matches!(result, Err(DomainError::InvalidQuantity { .. })));
}

#[test]
fn test_validate_declared_fare_within_epsilon() {
    assert!(validate_declared_fare(300.0, 300).is_ok());
    assert!(validate_declared_fare(300.005, 300).is_ok());
}

#[test]
fn test_validate_declared_fare_rejects_mismatch() {
    let result = validate_declared_fare(301.0, 300);
    assert!(matches!(result, Err(DomainError::FareMismatch { .. })));
}

#[test]
fn test_travel_schedule_accepts_operating_hours() {
    let date = NOW.date();
    assert!(validate_travel_schedule(date, time!(7:00), NOW).is_ok());
    assert!(validate_travel_schedule(date, time!(14:30), NOW).is_ok());
    assert!(validate_travel_schedule(date, time!(22:00), NOW).is_ok());
}

#[test]
fn test_travel_schedule_rejects_outside_operating_hours() {
    let date = NOW.date();
    assert!(matches!(
        validate_travel_schedule(date, time!(6:59), NOW),
        Err(DomainError::InvalidTravelTime { .. })
    ));
    assert!(matches!(
        validate_travel_schedule(date, time!(22:01), NOW),
        Err(DomainError::InvalidTravelTime { .. })
    ));
}

#[test]
fn test_travel_schedule_rejects_past_date() {
    let yesterday = NOW.date() - Duration::days(1);
    let result = validate_travel_schedule(yesterday, time!(9:00), NOW);
    assert!(matches!(
        result,
        Err(DomainError::TravelDateOutOfRange { .. })
    ));
}

#[test]
fn test_travel_schedule_accepts_horizon_boundary() {
    let boundary = NOW.date() + Duration::days(30);
    assert!(validate_travel_schedule(boundary, time!(9:00), NOW).is_ok());
}

#[test]
fn test_travel_schedule_rejects_beyond_horizon() {
    let too_far = NOW.date() + Duration::days(31);
    let result = validate_travel_schedule(too_far, time!(9:00), NOW);
    assert!(matches!(
        result,
        Err(DomainError::TravelDateOutOfRange { .. })
    ));
}

#[test]
fn test_validate_payment_accepts_positive_amount() {
    assert!(validate_payment(500, "bkash").is_ok());
}

#[test]
fn test_validate_payment_rejects_non_positive_amount() {
    assert!(matches!(
        validate_payment(0, "bkash"),
        Err(DomainError::InvalidAmount { .. })
    ));
    assert!(matches!(
        validate_payment(-10, "bkash"),
        Err(DomainError::InvalidAmount { .. })
    ));
}

#[test]
fn test_validate_payment_rejects_empty_method() {
    assert!(matches!(
        validate_payment(500, "  "),
        Err(DomainError::InvalidPaymentMethod)
    ));
}
