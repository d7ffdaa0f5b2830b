// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card and ledger lookups.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{CardRow, TransactionRow, card_from_row, transaction_from_row};
use crate::diesel_schema::{card_transactions, virtual_cards};
use crate::error::PersistenceError;
use metro_ticket_domain::{CardTransaction, VirtualCard};

/// Retrieves a card by cardholder email.
///
/// The email column is collated case-insensitively, matching how the
/// unique constraint treats it.
///
/// # Errors
///
/// Returns an error if the query fails or the row fails to map.
pub fn card_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<VirtualCard>, PersistenceError> {
    let row: Option<CardRow> = virtual_cards::table
        .filter(virtual_cards::email.eq(email))
        .select((
            virtual_cards::card_id,
            virtual_cards::email,
            virtual_cards::card_number,
            virtual_cards::balance,
            virtual_cards::hold_balance,
            virtual_cards::is_active,
            virtual_cards::last_payment_method,
            virtual_cards::last_transaction_id,
            virtual_cards::last_paid_at,
            virtual_cards::last_used_at,
            virtual_cards::created_at,
        ))
        .first(conn)
        .optional()?;

    row.map(card_from_row).transpose()
}

/// Checks whether a card number is already assigned.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn card_number_exists(
    conn: &mut SqliteConnection,
    card_number: &str,
) -> Result<bool, PersistenceError> {
    let found: bool = diesel::select(exists(
        virtual_cards::table.filter(virtual_cards::card_number.eq(card_number)),
    ))
    .get_result(conn)?;
    Ok(found)
}

/// Retrieves a card's ledger in append order.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to map.
pub fn transactions_for_card(
    conn: &mut SqliteConnection,
    card_id: i64,
) -> Result<Vec<CardTransaction>, PersistenceError> {
    let rows: Vec<TransactionRow> = card_transactions::table
        .filter(card_transactions::card_id.eq(card_id))
        .order(card_transactions::transaction_id.asc())
        .select((
            card_transactions::transaction_id,
            card_transactions::card_id,
            card_transactions::kind,
            card_transactions::amount,
            card_transactions::from_station,
            card_transactions::to_station,
            card_transactions::created_at,
        ))
        .load(conn)?;

    rows.into_iter().map(transaction_from_row).collect()
}
