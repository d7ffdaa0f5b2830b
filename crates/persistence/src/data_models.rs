// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-to-domain mapping.
//!
//! Both ticket tables share the same core column set, so queries select
//! the common columns into one tuple shape and tag the result with the
//! table's `BookingKind`. Timestamps are stored as RFC 3339 text in UTC
//! with whole-second precision, which keeps lexicographic and temporal
//! ordering in agreement for window comparisons done in SQL.

use crate::error::PersistenceError;
use metro_ticket_domain::{
    BookingKind, CardTransaction, Station, Ticket, TicketStatus, TransactionKind, VirtualCard,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// The common ticket columns, in schema order.
pub type TicketRow = (
    i64,            // ticket_id
    String,         // base_pnr
    i32,            // ticket_number
    String,         // full_pnr
    String,         // from_station
    String,         // to_station
    i32,            // base_fare
    i32,            // total_fare
    String,         // status
    String,         // booking_time
    String,         // valid_from
    String,         // valid_until
    Option<String>, // used_at
);

/// A `virtual_cards` row.
pub type CardRow = (
    i64,            // card_id
    String,         // email
    Option<String>, // card_number
    i64,            // balance
    i64,            // hold_balance
    i32,            // is_active
    Option<String>, // last_payment_method
    Option<i64>,    // last_transaction_id
    Option<String>, // last_paid_at
    Option<String>, // last_used_at
    String,         // created_at
);

/// A `card_transactions` row.
pub type TransactionRow = (
    i64,            // transaction_id
    i64,            // card_id
    String,         // kind
    i64,            // amount
    Option<String>, // from_station
    Option<String>, // to_station
    String,         // created_at
);

/// Formats a timestamp for storage: RFC 3339, UTC, whole seconds.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    ts.to_offset(time::UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the text is not valid RFC 3339.
pub fn parse_timestamp(s: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(s, &Rfc3339)
        .map_err(|e| PersistenceError::DataCorruption(format!("bad timestamp {s:?}: {e}")))
}

fn parse_optional_timestamp(s: Option<&str>) -> Result<Option<OffsetDateTime>, PersistenceError> {
    s.map(parse_timestamp).transpose()
}

fn parse_station(s: &str) -> Result<Station, PersistenceError> {
    s.parse()
        .map_err(|_| PersistenceError::DataCorruption(format!("unknown station {s:?}")))
}

fn to_u32(n: i32, what: &str) -> Result<u32, PersistenceError> {
    u32::try_from(n).map_err(|_| PersistenceError::DataCorruption(format!("negative {what}: {n}")))
}

/// Maps a common ticket row to the domain `Ticket`, tagging it with the
/// table it came from.
///
/// # Errors
///
/// Returns `DataCorruption` if any stored value fails to parse.
pub fn ticket_from_row(kind: BookingKind, row: TicketRow) -> Result<Ticket, PersistenceError> {
    let (
        ticket_id,
        base_pnr,
        ticket_number,
        full_pnr,
        from_station,
        to_station,
        base_fare,
        total_fare,
        status,
        booking_time,
        valid_from,
        valid_until,
        used_at,
    ) = row;

    let status: TicketStatus = status
        .parse()
        .map_err(|_| PersistenceError::DataCorruption(format!("unknown status {status:?}")))?;

    Ok(Ticket {
        ticket_id,
        kind,
        base_pnr,
        ticket_number: to_u32(ticket_number, "ticket_number")?,
        full_pnr,
        from_station: parse_station(&from_station)?,
        to_station: parse_station(&to_station)?,
        base_fare: to_u32(base_fare, "base_fare")?,
        total_fare: to_u32(total_fare, "total_fare")?,
        status,
        booking_time: parse_timestamp(&booking_time)?,
        valid_from: parse_timestamp(&valid_from)?,
        valid_until: parse_timestamp(&valid_until)?,
        used_at: parse_optional_timestamp(used_at.as_deref())?,
    })
}

/// Maps a `virtual_cards` row to the domain `VirtualCard`.
///
/// # Errors
///
/// Returns `DataCorruption` if any stored value fails to parse.
pub fn card_from_row(row: CardRow) -> Result<VirtualCard, PersistenceError> {
    let (
        card_id,
        email,
        card_number,
        balance,
        hold_balance,
        is_active,
        last_payment_method,
        last_transaction_id,
        last_paid_at,
        last_used_at,
        created_at,
    ) = row;

    Ok(VirtualCard {
        card_id,
        email,
        card_number,
        balance,
        hold_balance,
        is_active: is_active != 0,
        last_payment_method,
        last_transaction_id,
        last_paid_at: parse_optional_timestamp(last_paid_at.as_deref())?,
        last_used_at: parse_optional_timestamp(last_used_at.as_deref())?,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Maps a `card_transactions` row to the domain `CardTransaction`.
///
/// # Errors
///
/// Returns `DataCorruption` if any stored value fails to parse.
pub fn transaction_from_row(row: TransactionRow) -> Result<CardTransaction, PersistenceError> {
    let (transaction_id, card_id, kind, amount, from_station, to_station, created_at) = row;

    let kind = TransactionKind::parse_str(&kind)
        .ok_or_else(|| PersistenceError::DataCorruption(format!("unknown kind {kind:?}")))?;

    Ok(CardTransaction {
        transaction_id,
        card_id,
        kind,
        amount,
        from_station: from_station.as_deref().map(parse_station).transpose()?,
        to_station: to_station.as_deref().map(parse_station).transpose()?,
        created_at: parse_timestamp(&created_at)?,
    })
}
