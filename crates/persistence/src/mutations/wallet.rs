// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card and ledger writes.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::format_timestamp;
use crate::diesel_schema::{card_transactions, virtual_cards};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use metro_ticket::NewCardTransaction;
use metro_ticket_domain::VirtualCard;

/// Creates an inactive, unfunded card row for a cardholder.
///
/// # Errors
///
/// Returns `UniqueViolation` if a card already exists for this email,
/// or another error if the insert fails.
pub fn create_card(
    conn: &mut SqliteConnection,
    email: &str,
    created_at: OffsetDateTime,
) -> Result<VirtualCard, PersistenceError> {
    let created_at_text = format_timestamp(created_at)?;

    diesel::insert_into(virtual_cards::table)
        .values((
            virtual_cards::email.eq(email),
            virtual_cards::created_at.eq(&created_at_text),
        ))
        .execute(conn)?;

    let card_id = get_last_insert_rowid(conn)?;
    info!(card_id, "virtual card created");

    Ok(VirtualCard {
        card_id,
        email: email.to_string(),
        card_number: None,
        balance: 0,
        hold_balance: 0,
        is_active: false,
        last_payment_method: None,
        last_transaction_id: None,
        last_paid_at: None,
        last_used_at: None,
        created_at,
    })
}

/// Writes back a card's mutable fields.
///
/// # Errors
///
/// Returns `NotFound` if no row with this card ID exists, or another
/// error if the update fails.
pub fn update_card(
    conn: &mut SqliteConnection,
    card: &VirtualCard,
) -> Result<(), PersistenceError> {
    let last_paid_at = card.last_paid_at.map(format_timestamp).transpose()?;
    let last_used_at = card.last_used_at.map(format_timestamp).transpose()?;

    let rows = diesel::update(virtual_cards::table)
        .filter(virtual_cards::card_id.eq(card.card_id))
        .set((
            virtual_cards::card_number.eq(card.card_number.as_deref()),
            virtual_cards::balance.eq(card.balance),
            virtual_cards::hold_balance.eq(card.hold_balance),
            virtual_cards::is_active.eq(i32::from(card.is_active)),
            virtual_cards::last_payment_method.eq(card.last_payment_method.as_deref()),
            virtual_cards::last_transaction_id.eq(card.last_transaction_id),
            virtual_cards::last_paid_at.eq(last_paid_at),
            virtual_cards::last_used_at.eq(last_used_at),
        ))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!("card {}", card.card_id)));
    }
    debug!(card_id = card.card_id, "virtual card updated");
    Ok(())
}

/// Appends a ledger row and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails, including a foreign key
/// failure for an unknown card ID.
pub fn append_transaction(
    conn: &mut SqliteConnection,
    transaction: &NewCardTransaction,
) -> Result<i64, PersistenceError> {
    let created_at = format_timestamp(transaction.created_at)?;

    diesel::insert_into(card_transactions::table)
        .values((
            card_transactions::card_id.eq(transaction.card_id),
            card_transactions::kind.eq(transaction.kind.as_str()),
            card_transactions::amount.eq(transaction.amount),
            card_transactions::from_station.eq(transaction.from_station.map(|s| s.as_str())),
            card_transactions::to_station.eq(transaction.to_station.map(|s| s.as_str())),
            card_transactions::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let transaction_id = get_last_insert_rowid(conn)?;
    debug!(
        transaction_id,
        card_id = transaction.card_id,
        kind = transaction.kind.as_str(),
        "ledger row appended"
    );
    Ok(transaction_id)
}
