// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket lookups across the two booking tables.
//!
//! A base PNR lives in exactly one table; both are probed because the
//! caller does not know which flavor a PNR belongs to. Uniqueness across
//! the tables is upheld by the existence pre-check and insert retry in
//! the booking service, not by a cross-table constraint.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{TicketRow, ticket_from_row};
use crate::diesel_schema::{instant_tickets, scheduled_tickets};
use crate::error::PersistenceError;
use metro_ticket_domain::{BookingKind, Ticket};

/// Checks whether a base PNR exists in either booking table.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn base_pnr_exists(
    conn: &mut SqliteConnection,
    base_pnr: &str,
) -> Result<bool, PersistenceError> {
    let in_instant: bool = diesel::select(exists(
        instant_tickets::table.filter(instant_tickets::base_pnr.eq(base_pnr)),
    ))
    .get_result(conn)?;
    if in_instant {
        return Ok(true);
    }

    let in_scheduled: bool = diesel::select(exists(
        scheduled_tickets::table.filter(scheduled_tickets::base_pnr.eq(base_pnr)),
    ))
    .get_result(conn)?;
    Ok(in_scheduled)
}

/// Retrieves all tickets of a booking, ordered by ticket number.
///
/// Returns an empty vector if the base PNR is unknown.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails to map.
pub fn tickets_for_base_pnr(
    conn: &mut SqliteConnection,
    base_pnr: &str,
) -> Result<Vec<Ticket>, PersistenceError> {
    let instant_rows: Vec<TicketRow> = instant_tickets::table
        .filter(instant_tickets::base_pnr.eq(base_pnr))
        .order(instant_tickets::ticket_number.asc())
        .select((
            instant_tickets::ticket_id,
            instant_tickets::base_pnr,
            instant_tickets::ticket_number,
            instant_tickets::full_pnr,
            instant_tickets::from_station,
            instant_tickets::to_station,
            instant_tickets::base_fare,
            instant_tickets::total_fare,
            instant_tickets::status,
            instant_tickets::booking_time,
            instant_tickets::valid_from,
            instant_tickets::valid_until,
            instant_tickets::used_at,
        ))
        .load(conn)?;

    if !instant_rows.is_empty() {
        return instant_rows
            .into_iter()
            .map(|row| ticket_from_row(BookingKind::Instant, row))
            .collect();
    }

    let scheduled_rows: Vec<TicketRow> = scheduled_tickets::table
        .filter(scheduled_tickets::base_pnr.eq(base_pnr))
        .order(scheduled_tickets::ticket_number.asc())
        .select((
            scheduled_tickets::ticket_id,
            scheduled_tickets::base_pnr,
            scheduled_tickets::ticket_number,
            scheduled_tickets::full_pnr,
            scheduled_tickets::from_station,
            scheduled_tickets::to_station,
            scheduled_tickets::base_fare,
            scheduled_tickets::total_fare,
            scheduled_tickets::status,
            scheduled_tickets::booking_time,
            scheduled_tickets::valid_from,
            scheduled_tickets::valid_until,
            scheduled_tickets::used_at,
        ))
        .load(conn)?;

    scheduled_rows
        .into_iter()
        .map(|row| ticket_from_row(BookingKind::Scheduled, row))
        .collect()
}

/// Retrieves a single ticket by its full PNR, probing both tables.
///
/// # Errors
///
/// Returns an error if the query fails or the row fails to map.
pub fn find_by_full_pnr(
    conn: &mut SqliteConnection,
    full_pnr: &str,
) -> Result<Option<Ticket>, PersistenceError> {
    let instant_row: Option<TicketRow> = instant_tickets::table
        .filter(instant_tickets::full_pnr.eq(full_pnr))
        .select((
            instant_tickets::ticket_id,
            instant_tickets::base_pnr,
            instant_tickets::ticket_number,
            instant_tickets::full_pnr,
            instant_tickets::from_station,
            instant_tickets::to_station,
            instant_tickets::base_fare,
            instant_tickets::total_fare,
            instant_tickets::status,
            instant_tickets::booking_time,
            instant_tickets::valid_from,
            instant_tickets::valid_until,
            instant_tickets::used_at,
        ))
        .first(conn)
        .optional()?;

    if let Some(row) = instant_row {
        return Ok(Some(ticket_from_row(BookingKind::Instant, row)?));
    }

    let scheduled_row: Option<TicketRow> = scheduled_tickets::table
        .filter(scheduled_tickets::full_pnr.eq(full_pnr))
        .select((
            scheduled_tickets::ticket_id,
            scheduled_tickets::base_pnr,
            scheduled_tickets::ticket_number,
            scheduled_tickets::full_pnr,
            scheduled_tickets::from_station,
            scheduled_tickets::to_station,
            scheduled_tickets::base_fare,
            scheduled_tickets::total_fare,
            scheduled_tickets::status,
            scheduled_tickets::booking_time,
            scheduled_tickets::valid_from,
            scheduled_tickets::valid_until,
            scheduled_tickets::used_at,
        ))
        .first(conn)
        .optional()?;

    scheduled_row
        .map(|row| ticket_from_row(BookingKind::Scheduled, row))
        .transpose()
}

/// Checks whether a ticket row exists in the table for `kind`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn ticket_exists(
    conn: &mut SqliteConnection,
    kind: BookingKind,
    ticket_id: i64,
) -> Result<bool, PersistenceError> {
    let found: bool = match kind {
        BookingKind::Instant => diesel::select(exists(
            instant_tickets::table.filter(instant_tickets::ticket_id.eq(ticket_id)),
        ))
        .get_result(conn)?,
        BookingKind::Scheduled => diesel::select(exists(
            scheduled_tickets::table.filter(scheduled_tickets::ticket_id.eq(ticket_id)),
        ))
        .get_result(conn)?,
    };
    Ok(found)
}
