// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::tests::{FixedClock, InMemoryStore, ScriptedDigits, test_now};
use crate::{process_payment, record_trip};
use metro_ticket_domain::{DomainError, Station, TransactionKind};
use time::Duration;

const EMAIL: &str = "rider@example.com";

#[test]
fn test_first_payment_activates_card() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&["00000001"]);

    let receipt = process_payment(&mut store, &clock, &mut digits, EMAIL, 500, "bkash").unwrap();
    assert!(receipt.activated);
    assert_eq!(receipt.card_number, "2200000001");
    assert_eq!(receipt.amount, 500);
    assert_eq!(receipt.balance, 300);
    assert_eq!(receipt.hold_balance, 200);

    let card = &store.cards[0];
    assert!(card.is_active);
    assert_eq!(card.card_number.as_deref(), Some("2200000001"));
    assert_eq!(card.balance, 300);
    assert_eq!(card.hold_balance, 200);
    assert_eq!(card.last_payment_method.as_deref(), Some("bkash"));
    assert_eq!(card.last_transaction_id, Some(receipt.transaction_id));
    assert_eq!(card.last_paid_at, Some(test_now()));

    assert_eq!(store.transactions.len(), 1);
    let row = &store.transactions[0];
    assert_eq!(row.kind, TransactionKind::Payment);
    assert_eq!(row.amount, 500);
    assert_eq!(row.from_station, None);
}

#[test]
fn test_first_payment_exactly_covering_hold() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);

    let receipt = process_payment(&mut store, &clock, &mut digits, EMAIL, 200, "card").unwrap();
    assert!(receipt.activated);
    assert_eq!(receipt.balance, 0);
    assert_eq!(receipt.hold_balance, 200);
}

#[test]
fn test_first_payment_below_hold_is_rejected() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);

    let result = process_payment(&mut store, &clock, &mut digits, EMAIL, 150, "bkash");
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidAmount { .. }))
    ));
    // The card row may exist but stays inactive and unfunded.
    assert!(store.cards.iter().all(|c| !c.is_active && c.balance == 0));
    assert!(store.transactions.is_empty());
}

#[test]
fn test_payment_rejects_bad_input() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);

    let zero = process_payment(&mut store, &clock, &mut digits, EMAIL, 0, "bkash");
    assert!(matches!(
        zero,
        Err(CoreError::DomainViolation(DomainError::InvalidAmount { .. }))
    ));

    let no_method = process_payment(&mut store, &clock, &mut digits, EMAIL, 500, "  ");
    assert!(matches!(
        no_method,
        Err(CoreError::DomainViolation(DomainError::InvalidPaymentMethod))
    ));
    assert!(store.cards.is_empty());
}

#[test]
fn test_second_payment_tops_up_without_new_hold() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&["00000001"]);

    process_payment(&mut store, &clock, &mut digits, EMAIL, 500, "bkash").unwrap();
    let later = FixedClock(test_now() + Duration::hours(1));
    let receipt = process_payment(&mut store, &later, &mut digits, EMAIL, 100, "nagad").unwrap();

    assert!(!receipt.activated);
    assert_eq!(receipt.balance, 400);
    assert_eq!(receipt.hold_balance, 200);
    assert_eq!(receipt.card_number, "2200000001");
    assert_eq!(store.cards.len(), 1);
    assert_eq!(store.transactions.len(), 2);
    assert_eq!(
        store.cards[0].last_payment_method.as_deref(),
        Some("nagad")
    );
}

#[test]
fn test_card_number_collision_retries() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&["11111111"]);
    process_payment(&mut store, &clock, &mut digits, EMAIL, 500, "bkash").unwrap();

    let mut colliding = ScriptedDigits::new(&["11111111", "22222222"]);
    let receipt = process_payment(
        &mut store,
        &clock,
        &mut colliding,
        "other@example.com",
        300,
        "bkash",
    )
    .unwrap();
    assert_eq!(receipt.card_number, "2222222222");
}

#[test]
fn test_trip_deducts_and_records_route() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);
    process_payment(&mut store, &clock, &mut digits, EMAIL, 500, "bkash").unwrap();

    let later = FixedClock(test_now() + Duration::minutes(30));
    let receipt = record_trip(
        &mut store,
        &later,
        EMAIL,
        50,
        Station::Agargaon,
        Station::Motijheel,
    )
    .unwrap();

    assert_eq!(receipt.amount, 50);
    assert_eq!(receipt.balance, 250);

    let card = &store.cards[0];
    assert_eq!(card.balance, 250);
    assert_eq!(card.hold_balance, 200);
    assert_eq!(card.last_used_at, Some(test_now() + Duration::minutes(30)));

    let row = store.transactions.last().unwrap();
    assert_eq!(row.kind, TransactionKind::Trip);
    assert_eq!(row.from_station, Some(Station::Agargaon));
    assert_eq!(row.to_station, Some(Station::Motijheel));
}

#[test]
fn test_trip_insufficient_balance_leaves_card_untouched() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);
    process_payment(&mut store, &clock, &mut digits, EMAIL, 210, "bkash").unwrap();

    let result = record_trip(
        &mut store,
        &clock,
        EMAIL,
        30,
        Station::Agargaon,
        Station::Motijheel,
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InsufficientBalance {
                balance: 10,
                required: 30,
            }
        ))
    ));
    // The hold is not spendable and the balance is unchanged.
    assert_eq!(store.cards[0].balance, 10);
    assert_eq!(store.cards[0].hold_balance, 200);
    assert_eq!(store.transactions.len(), 1);
}

#[test]
fn test_trip_rejects_bad_input() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());
    let mut digits = ScriptedDigits::new(&[]);
    process_payment(&mut store, &clock, &mut digits, EMAIL, 500, "bkash").unwrap();

    let zero = record_trip(
        &mut store,
        &clock,
        EMAIL,
        0,
        Station::Agargaon,
        Station::Motijheel,
    );
    assert!(matches!(
        zero,
        Err(CoreError::DomainViolation(DomainError::InvalidAmount { .. }))
    ));

    let same = record_trip(
        &mut store,
        &clock,
        EMAIL,
        50,
        Station::Agargaon,
        Station::Agargaon,
    );
    assert!(matches!(
        same,
        Err(CoreError::DomainViolation(DomainError::SameStationRoute(_)))
    ));
}

#[test]
fn test_trip_for_unknown_cardholder() {
    let mut store = InMemoryStore::new();
    let clock = FixedClock(test_now());

    let result = record_trip(
        &mut store,
        &clock,
        "nobody@example.com",
        50,
        Station::Agargaon,
        Station::Motijheel,
    );
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}
