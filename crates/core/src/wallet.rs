// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Virtual-card payment and trip flows.
//!
//! The payment gateway is a black box upstream of these functions; by the
//! time `process_payment` runs, the gateway has already reported success.
//! The first payment activates the card: the fixed hold is reserved, a
//! card number is assigned, and the remainder becomes spendable balance.
//! A first payment below the hold is rejected outright rather than
//! letting the balance go negative.

use crate::clock::Clock;
use crate::digits::DigitSource;
use crate::error::CoreError;
use crate::pnr_gen::generate_card_number;
use crate::store::{NewCardTransaction, WalletStore};
use metro_ticket_domain::{
    DomainError, HOLD_BALANCE, Station, TransactionKind, validate_payment, validate_route,
};
use tracing::{debug, info};

/// Result of a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// The card the payment went to.
    pub card_id: i64,
    /// The card number, assigned on first payment.
    pub card_number: String,
    /// Ledger id of the PAYMENT row.
    pub transaction_id: i64,
    /// Amount paid in taka.
    pub amount: i64,
    /// Spendable balance after the payment.
    pub balance: i64,
    /// Non-spendable reserve after the payment.
    pub hold_balance: i64,
    /// True if this payment activated the card.
    pub activated: bool,
}

/// Result of a successful trip deduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripReceipt {
    /// The card the trip was charged to.
    pub card_id: i64,
    /// Ledger id of the TRIP row.
    pub transaction_id: i64,
    /// Amount deducted in taka.
    pub amount: i64,
    /// Spendable balance after the deduction.
    pub balance: i64,
}

/// Records a successful top-up payment for a cardholder, creating and
/// activating the card on first payment.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` for a non-positive amount, an
/// empty method, or a first payment below the hold reserve (nothing
/// written), or `CoreError::StoreFailure` on store errors.
pub fn process_payment<S, C, D>(
    store: &mut S,
    clock: &C,
    digits: &mut D,
    email: &str,
    amount: i64,
    method: &str,
) -> Result<PaymentReceipt, CoreError>
where
    S: WalletStore + ?Sized,
    C: Clock + ?Sized,
    D: DigitSource + ?Sized,
{
    validate_payment(amount, method)?;

    let now = clock.now();
    let mut card = match store.card_by_email(email)? {
        Some(card) => card,
        None => store.create_card(email, now)?,
    };

    let activating = !card.is_active;
    if activating {
        if amount < HOLD_BALANCE {
            return Err(DomainError::InvalidAmount {
                amount,
                reason: format!("first payment must cover the {HOLD_BALANCE} hold reserve"),
            }
            .into());
        }
        if card.card_number.is_none() {
            let number =
                generate_card_number(digits, |candidate| store.card_number_exists(candidate))?;
            card.card_number = Some(number);
        }
        card.hold_balance = HOLD_BALANCE;
        card.balance = amount - HOLD_BALANCE;
        card.is_active = true;
    } else {
        card.balance += amount;
    }

    let transaction_id = store.append_transaction(&NewCardTransaction {
        card_id: card.card_id,
        kind: TransactionKind::Payment,
        amount,
        from_station: None,
        to_station: None,
        created_at: now,
    })?;

    card.last_payment_method = Some(method.to_string());
    card.last_transaction_id = Some(transaction_id);
    card.last_paid_at = Some(now);
    store.update_card(&card)?;

    let card_number = card.card_number.clone().unwrap_or_default();
    info!(
        card_id = card.card_id,
        amount,
        activated = activating,
        "card payment processed"
    );

    Ok(PaymentReceipt {
        card_id: card.card_id,
        card_number,
        transaction_id,
        amount,
        balance: card.balance,
        hold_balance: card.hold_balance,
        activated: activating,
    })
}

/// Deducts a trip's cost from a cardholder's balance.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for an unknown cardholder,
/// `CoreError::DomainViolation` for a non-positive amount, a
/// same-station route, or an insufficient balance (nothing written), or
/// `CoreError::StoreFailure` on store errors.
pub fn record_trip<S, C>(
    store: &mut S,
    clock: &C,
    email: &str,
    amount: i64,
    from_station: Station,
    to_station: Station,
) -> Result<TripReceipt, CoreError>
where
    S: WalletStore + ?Sized,
    C: Clock + ?Sized,
{
    if amount <= 0 {
        return Err(DomainError::InvalidAmount {
            amount,
            reason: "trip amount must be positive".to_string(),
        }
        .into());
    }
    validate_route(from_station, to_station)?;

    let mut card = store
        .card_by_email(email)?
        .ok_or_else(|| CoreError::NotFound(format!("card for {email}")))?;

    if card.balance < amount {
        return Err(DomainError::InsufficientBalance {
            balance: card.balance,
            required: amount,
        }
        .into());
    }

    let now = clock.now();
    let transaction_id = store.append_transaction(&NewCardTransaction {
        card_id: card.card_id,
        kind: TransactionKind::Trip,
        amount,
        from_station: Some(from_station),
        to_station: Some(to_station),
        created_at: now,
    })?;

    card.balance -= amount;
    card.last_used_at = Some(now);
    store.update_card(&card)?;

    debug!(card_id = card.card_id, amount, "trip recorded");

    Ok(TripReceipt {
        card_id: card.card_id,
        transaction_id,
        amount,
        balance: card.balance,
    })
}
