// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::tests::{FixedClock, InMemoryStore, ScriptedDigits, test_now};
use crate::{
    InstantBookingRequest, ScheduledBookingRequest, create_instant_booking,
    create_scheduled_booking, mark_ticket_expired, mark_ticket_used, sweep_expired,
};
use metro_ticket_domain::{DomainError, FareCalculator, Station, TicketStatus};
use time::Duration;
use time::macros::time;

fn seed_instant_booking(store: &mut InMemoryStore, quantity: u32) -> Vec<String> {
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);
    let calculator = FareCalculator::default();
    let summary = create_instant_booking(
        store,
        &clock,
        &mut digits,
        &calculator,
        &InstantBookingRequest {
            from_station: Station::Agargaon,
            to_station: Station::Motijheel,
            quantity,
            declared_total_fare: f64::from(50 * quantity),
            client_ip: None,
            user_agent: None,
        },
    )
    .unwrap();
    summary.full_pnrs
}

fn seed_scheduled_booking(store: &mut InMemoryStore) -> String {
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);
    let calculator = FareCalculator::default();
    let summary = create_scheduled_booking(
        store,
        &clock,
        &mut digits,
        &calculator,
        &ScheduledBookingRequest {
            from_station: Station::Agargaon,
            to_station: Station::Motijheel,
            quantity: 1,
            declared_total_fare: 50.0,
            travel_date: test_now().date() + Duration::days(2),
            travel_time: time!(9:00),
            contact_phone: String::from("01700000000"),
        },
    )
    .unwrap();
    summary.full_pnrs[0].clone()
}

#[test]
fn test_mark_used_consumes_one_seat() {
    let mut store = InMemoryStore::new();
    let pnrs = seed_instant_booking(&mut store, 2);
    let clock = FixedClock(test_now() + Duration::minutes(10));

    let used = mark_ticket_used(&mut store, &clock, &pnrs[0]).unwrap();
    assert_eq!(used.status, TicketStatus::Used);
    assert_eq!(used.used_at, Some(test_now() + Duration::minutes(10)));

    // The sibling seat stays active.
    let sibling = &store.tickets[1];
    assert_eq!(sibling.status, TicketStatus::Active);
    assert_eq!(sibling.used_at, None);
}

#[test]
fn test_mark_used_twice_fails_second_time() {
    let mut store = InMemoryStore::new();
    let pnrs = seed_instant_booking(&mut store, 1);
    let clock = FixedClock(test_now() + Duration::minutes(5));

    mark_ticket_used(&mut store, &clock, &pnrs[0]).unwrap();
    let second = mark_ticket_used(&mut store, &clock, &pnrs[0]);
    assert!(matches!(
        second,
        Err(CoreError::DomainViolation(DomainError::TicketNotValid { .. }))
    ));
}

#[test]
fn test_mark_used_after_window_expires_lazily() {
    let mut store = InMemoryStore::new();
    let pnrs = seed_instant_booking(&mut store, 1);
    let clock = FixedClock(test_now() + Duration::hours(2));

    let result = mark_ticket_used(&mut store, &clock, &pnrs[0]);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::TicketNotValid { .. }))
    ));
    // The failed gate check persisted the expiry.
    assert_eq!(store.tickets[0].status, TicketStatus::Expired);
}

#[test]
fn test_mark_used_before_scheduled_window_opens() {
    let mut store = InMemoryStore::new();
    let pnr = seed_scheduled_booking(&mut store);
    let clock = FixedClock(test_now() + Duration::hours(1));

    let result = mark_ticket_used(&mut store, &clock, &pnr);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::TicketNotValid { .. }))
    ));
    // Not yet lapsed, so the seat stays scheduled.
    assert_eq!(store.tickets[0].status, TicketStatus::Scheduled);
}

#[test]
fn test_mark_used_inside_scheduled_window() {
    let mut store = InMemoryStore::new();
    let pnr = seed_scheduled_booking(&mut store);
    let window_open = (test_now().date() + Duration::days(2))
        .with_time(time!(9:30))
        .assume_utc();
    let clock = FixedClock(window_open);

    let used = mark_ticket_used(&mut store, &clock, &pnr).unwrap();
    assert_eq!(used.status, TicketStatus::Used);
}

#[test]
fn test_mark_used_unknown_pnr() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let result = mark_ticket_used(&mut store, &clock, "MRT000000000-1");
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[test]
fn test_mark_expired_is_idempotent() {
    let mut store = InMemoryStore::new();
    let pnrs = seed_instant_booking(&mut store, 1);

    mark_ticket_expired(&mut store, &pnrs[0]).unwrap();
    assert_eq!(store.tickets[0].status, TicketStatus::Expired);

    mark_ticket_expired(&mut store, &pnrs[0]).unwrap();
    assert_eq!(store.tickets[0].status, TicketStatus::Expired);
}

#[test]
fn test_mark_expired_leaves_used_ticket_alone() {
    let mut store = InMemoryStore::new();
    let pnrs = seed_instant_booking(&mut store, 1);
    let clock = FixedClock(test_now() + Duration::minutes(5));
    mark_ticket_used(&mut store, &clock, &pnrs[0]).unwrap();

    mark_ticket_expired(&mut store, &pnrs[0]).unwrap();
    assert_eq!(store.tickets[0].status, TicketStatus::Used);
}

#[test]
fn test_sweep_expires_only_lapsed_non_terminal_rows() {
    let mut store = InMemoryStore::new();
    let pnrs = seed_instant_booking(&mut store, 3);
    let gate_clock = FixedClock(test_now() + Duration::minutes(5));
    mark_ticket_used(&mut store, &gate_clock, &pnrs[0]).unwrap();

    let count = sweep_expired(&mut store, test_now() + Duration::hours(2)).unwrap();
    assert_eq!(count, 2);
    assert_eq!(store.tickets[0].status, TicketStatus::Used);
    assert_eq!(store.tickets[1].status, TicketStatus::Expired);
    assert_eq!(store.tickets[2].status, TicketStatus::Expired);

    // A second sweep finds nothing left to expire.
    let again = sweep_expired(&mut store, test_now() + Duration::hours(3)).unwrap();
    assert_eq!(again, 0);
}

#[test]
fn test_sweep_skips_tickets_still_in_window() {
    let mut store = InMemoryStore::new();
    seed_instant_booking(&mut store, 2);

    let count = sweep_expired(&mut store, test_now() + Duration::minutes(30)).unwrap();
    assert_eq!(count, 0);
    assert!(
        store
            .tickets
            .iter()
            .all(|t| t.status == TicketStatus::Active)
    );
}
