// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket writes.
//!
//! A booking batch is inserted inside one transaction so a unique
//! constraint violation on any row rolls back the whole checkout.
//! Status transitions are guarded updates: the WHERE clause requires a
//! non-terminal status, so a racing writer that already terminated the
//! row simply affects zero rows.

use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::format_timestamp;
use crate::diesel_schema::{instant_tickets, scheduled_tickets};
use crate::error::PersistenceError;
use crate::queries::tickets::ticket_exists;
use crate::sqlite::get_last_insert_rowid;
use metro_ticket::NewTicket;
use metro_ticket_domain::{BookingKind, TicketStatus};

/// Statuses a guarded update may transition away from.
const NON_TERMINAL: [&str; 2] = ["active", "scheduled"];

fn to_i32(n: u32, what: &str) -> Result<i32, PersistenceError> {
    i32::try_from(n)
        .map_err(|_| PersistenceError::SerializationError(format!("{what} out of range: {n}")))
}

/// Inserts a booking batch atomically and returns the new row IDs in
/// batch order.
///
/// # Errors
///
/// Returns `UniqueViolation` if the base PNR or any full PNR collides
/// with an existing booking, or another error if the insert fails.
pub fn insert_tickets(
    conn: &mut SqliteConnection,
    batch: &[NewTicket],
) -> Result<Vec<i64>, PersistenceError> {
    let Some(first) = batch.first() else {
        return Ok(Vec::new());
    };
    let kind = first.kind;

    let ids = conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
        let mut ids = Vec::with_capacity(batch.len());
        for row in batch {
            let booking_time = format_timestamp(row.booking_time)?;
            let valid_from = format_timestamp(row.valid_from)?;
            let valid_until = format_timestamp(row.valid_until)?;

            match kind {
                BookingKind::Instant => {
                    diesel::insert_into(instant_tickets::table)
                        .values((
                            instant_tickets::base_pnr.eq(&row.base_pnr),
                            instant_tickets::ticket_number
                                .eq(to_i32(row.ticket_number, "ticket_number")?),
                            instant_tickets::full_pnr.eq(&row.full_pnr),
                            instant_tickets::from_station.eq(row.from_station.as_str()),
                            instant_tickets::to_station.eq(row.to_station.as_str()),
                            instant_tickets::base_fare.eq(to_i32(row.base_fare, "base_fare")?),
                            instant_tickets::total_fare.eq(to_i32(row.total_fare, "total_fare")?),
                            instant_tickets::status.eq(row.status.as_str()),
                            instant_tickets::booking_time.eq(&booking_time),
                            instant_tickets::valid_from.eq(&valid_from),
                            instant_tickets::valid_until.eq(&valid_until),
                            instant_tickets::client_ip.eq(row.client_ip.as_deref()),
                            instant_tickets::user_agent.eq(row.user_agent.as_deref()),
                        ))
                        .execute(conn)?;
                }
                BookingKind::Scheduled => {
                    diesel::insert_into(scheduled_tickets::table)
                        .values((
                            scheduled_tickets::base_pnr.eq(&row.base_pnr),
                            scheduled_tickets::ticket_number
                                .eq(to_i32(row.ticket_number, "ticket_number")?),
                            scheduled_tickets::full_pnr.eq(&row.full_pnr),
                            scheduled_tickets::from_station.eq(row.from_station.as_str()),
                            scheduled_tickets::to_station.eq(row.to_station.as_str()),
                            scheduled_tickets::base_fare.eq(to_i32(row.base_fare, "base_fare")?),
                            scheduled_tickets::total_fare.eq(to_i32(row.total_fare, "total_fare")?),
                            scheduled_tickets::status.eq(row.status.as_str()),
                            scheduled_tickets::booking_time.eq(&booking_time),
                            scheduled_tickets::valid_from.eq(&valid_from),
                            scheduled_tickets::valid_until.eq(&valid_until),
                            scheduled_tickets::contact_phone.eq(row.contact_phone.as_deref()),
                        ))
                        .execute(conn)?;
                }
            }
            ids.push(get_last_insert_rowid(conn)?);
        }
        Ok(ids)
    })?;

    info!(
        base_pnr = %first.base_pnr,
        kind = kind.as_str(),
        rows = ids.len(),
        "booking batch inserted"
    );
    Ok(ids)
}

/// Marks a ticket used if it is still non-terminal.
///
/// Returns `false` if the row exists but already reached a terminal
/// status, which lets the caller distinguish a lost race from success.
///
/// # Errors
///
/// Returns `NotFound` if no row with this ID exists in the table for
/// `kind`, or another error if the update fails.
pub fn mark_used(
    conn: &mut SqliteConnection,
    kind: BookingKind,
    ticket_id: i64,
    used_at: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let used_at = format_timestamp(used_at)?;
    let used = TicketStatus::Used.as_str();

    let rows = match kind {
        BookingKind::Instant => diesel::update(instant_tickets::table)
            .filter(instant_tickets::ticket_id.eq(ticket_id))
            .filter(instant_tickets::status.eq_any(NON_TERMINAL))
            .set((
                instant_tickets::status.eq(used),
                instant_tickets::used_at.eq(Some(used_at)),
            ))
            .execute(conn)?,
        BookingKind::Scheduled => diesel::update(scheduled_tickets::table)
            .filter(scheduled_tickets::ticket_id.eq(ticket_id))
            .filter(scheduled_tickets::status.eq_any(NON_TERMINAL))
            .set((
                scheduled_tickets::status.eq(used),
                scheduled_tickets::used_at.eq(Some(used_at)),
            ))
            .execute(conn)?,
    };

    if rows == 1 {
        debug!(ticket_id, "ticket marked used");
        return Ok(true);
    }
    if ticket_exists(conn, kind, ticket_id)? {
        Ok(false)
    } else {
        Err(PersistenceError::NotFound(format!("ticket {ticket_id}")))
    }
}

/// Marks a ticket expired if it is still non-terminal; a no-op on
/// terminal rows.
///
/// # Errors
///
/// Returns `NotFound` if no row with this ID exists in the table for
/// `kind`, or another error if the update fails.
pub fn mark_expired(
    conn: &mut SqliteConnection,
    kind: BookingKind,
    ticket_id: i64,
) -> Result<(), PersistenceError> {
    let expired = TicketStatus::Expired.as_str();

    let rows = match kind {
        BookingKind::Instant => diesel::update(instant_tickets::table)
            .filter(instant_tickets::ticket_id.eq(ticket_id))
            .filter(instant_tickets::status.eq_any(NON_TERMINAL))
            .set(instant_tickets::status.eq(expired))
            .execute(conn)?,
        BookingKind::Scheduled => diesel::update(scheduled_tickets::table)
            .filter(scheduled_tickets::ticket_id.eq(ticket_id))
            .filter(scheduled_tickets::status.eq_any(NON_TERMINAL))
            .set(scheduled_tickets::status.eq(expired))
            .execute(conn)?,
    };

    if rows == 0 && !ticket_exists(conn, kind, ticket_id)? {
        return Err(PersistenceError::NotFound(format!("ticket {ticket_id}")));
    }
    debug!(ticket_id, "ticket marked expired");
    Ok(())
}

/// Expires every non-terminal ticket whose validity window lapsed
/// before `now`, across both tables.
///
/// Timestamps are stored as fixed-width RFC 3339 UTC text, so the
/// string comparison in SQL matches temporal order.
///
/// # Errors
///
/// Returns an error if either update fails.
pub fn expire_all_lapsed(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    let now = format_timestamp(now)?;
    let expired = TicketStatus::Expired.as_str();

    let instant_rows = diesel::update(instant_tickets::table)
        .filter(instant_tickets::status.eq_any(NON_TERMINAL))
        .filter(instant_tickets::valid_until.lt(&now))
        .set(instant_tickets::status.eq(expired))
        .execute(conn)?;

    let scheduled_rows = diesel::update(scheduled_tickets::table)
        .filter(scheduled_tickets::status.eq_any(NON_TERMINAL))
        .filter(scheduled_tickets::valid_until.lt(&now))
        .set(scheduled_tickets::status.eq(expired))
        .execute(conn)?;

    let total = instant_rows + scheduled_rows;
    info!(count = total, "expiry sweep applied");
    Ok(total)
}
