// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PNR verification and booking aggregation.
//!
//! Looking up either a base PNR or any seat's full PNR resolves to the
//! same aggregate view of the whole checkout. Lapsed rows are expired
//! opportunistically on the read path, one atomic row update each,
//! before the aggregate is built.

use crate::clock::Clock;
use crate::error::CoreError;
use crate::store::TicketStore;
use metro_ticket_domain::{BookingKind, Station, TicketStatus, normalize_pnr};
use time::OffsetDateTime;
use tracing::debug;

/// Per-seat detail within a booking view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetail {
    /// The seat's full PNR.
    pub full_pnr: String,
    /// 1-based sequence within the booking.
    pub ticket_number: u32,
    /// Current status after lazy expiry.
    pub status: TicketStatus,
    /// When the seat was consumed, if it was.
    pub used_at: Option<OffsetDateTime>,
    /// Per-seat fare in taka.
    pub fare: u32,
}

/// Aggregate view of one checkout.
///
/// Route, base fare, and validity window are shared by every row of a
/// booking (an invariant of creation), so they appear once here.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    /// Shared checkout reference.
    pub base_pnr: String,
    /// Instant or scheduled.
    pub kind: BookingKind,
    /// Origin station.
    pub from_station: Station,
    /// Destination station.
    pub to_station: Station,
    /// Per-seat fare in taka.
    pub base_fare: u32,
    /// Sum of row totals in taka.
    pub total_fare: u32,
    /// Number of seats in the booking.
    pub total_tickets: usize,
    /// Seats still awaiting use (active or scheduled).
    pub active_tickets: usize,
    /// Seats consumed.
    pub used_tickets: usize,
    /// Seats whose window lapsed.
    pub expired_tickets: usize,
    /// Seats voided before use.
    pub cancelled_tickets: usize,
    /// Whole minutes of validity left, zero once lapsed. All rows share
    /// one window, so this comes from the first ticket.
    pub remaining_minutes: i64,
    /// Per-seat details, in ticket-number order.
    pub tickets: Vec<TicketDetail>,
}

/// Looks up a booking by base PNR or any seat's full PNR.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` (`InvalidPnr`) for a malformed
/// PNR, `CoreError::NotFound` if no rows match, or
/// `CoreError::StoreFailure` on store errors.
pub fn lookup_by_pnr<S, C>(store: &mut S, clock: &C, pnr: &str) -> Result<BookingView, CoreError>
where
    S: TicketStore + ?Sized,
    C: Clock + ?Sized,
{
    let base_pnr = normalize_pnr(pnr)?;
    let mut tickets = store.tickets_for_base_pnr(&base_pnr)?;
    if tickets.is_empty() {
        return Err(CoreError::NotFound(format!("booking {base_pnr}")));
    }

    let now = clock.now();
    for ticket in &mut tickets {
        if !ticket.status.is_terminal() && ticket.is_expired(now) {
            store.mark_expired(ticket.kind, ticket.ticket_id)?;
            ticket.status = TicketStatus::Expired;
        }
    }

    let first = &tickets[0];
    let view = BookingView {
        base_pnr: base_pnr.clone(),
        kind: first.kind,
        from_station: first.from_station,
        to_station: first.to_station,
        base_fare: first.base_fare,
        total_fare: tickets.iter().map(|t| t.total_fare).sum(),
        total_tickets: tickets.len(),
        active_tickets: tickets
            .iter()
            .filter(|t| matches!(t.status, TicketStatus::Active | TicketStatus::Scheduled))
            .count(),
        used_tickets: tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Used)
            .count(),
        expired_tickets: tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Expired)
            .count(),
        cancelled_tickets: tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Cancelled)
            .count(),
        remaining_minutes: first.remaining_minutes(now),
        tickets: tickets
            .iter()
            .map(|t| TicketDetail {
                full_pnr: t.full_pnr.clone(),
                ticket_number: t.ticket_number,
                status: t.status,
                used_at: t.used_at,
                fare: t.total_fare,
            })
            .collect(),
    };

    debug!(base_pnr = %base_pnr, tickets = view.total_tickets, "booking looked up");
    Ok(view)
}
