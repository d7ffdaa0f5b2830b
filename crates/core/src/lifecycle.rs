// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket state transitions over the store.
//!
//! Transitions are monotonic and idempotent in effect: marking a ticket
//! used twice fails cleanly the second time, and marking an already
//! expired ticket expired again is a no-op. A `mark_used` racing the
//! expiry sweep is resolved by the store's status-preconditioned update;
//! whichever writer loses simply observes a terminal row.

use crate::clock::Clock;
use crate::error::CoreError;
use crate::store::TicketStore;
use metro_ticket_domain::{DomainError, Ticket, TicketStatus};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Consumes a ticket at the gate.
///
/// Succeeds only while the ticket is valid: non-terminal status and
/// `now` inside the validity window. A lapsed ticket is expired on the
/// spot before the failure is reported.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for an unknown full PNR,
/// `CoreError::DomainViolation` (`TicketNotValid`) for a ticket outside
/// its window or already terminal, or `CoreError::StoreFailure` on store
/// errors.
pub fn mark_ticket_used<S, C>(store: &mut S, clock: &C, full_pnr: &str) -> Result<Ticket, CoreError>
where
    S: TicketStore + ?Sized,
    C: Clock + ?Sized,
{
    let mut ticket = store
        .find_by_full_pnr(full_pnr)?
        .ok_or_else(|| CoreError::NotFound(format!("ticket {full_pnr}")))?;

    let now = clock.now();

    if !ticket.status.is_terminal() && ticket.is_expired(now) {
        // Lazy expiry on the read path.
        store.mark_expired(ticket.kind, ticket.ticket_id)?;
        ticket.status = TicketStatus::Expired;
    }

    if !ticket.is_valid(now) {
        return Err(DomainError::TicketNotValid {
            full_pnr: ticket.full_pnr.clone(),
            status: ticket.status.as_str().to_string(),
        }
        .into());
    }

    let transitioned = store.mark_used(ticket.kind, ticket.ticket_id, now)?;
    if !transitioned {
        // Another writer (gate or sweep) won the race.
        return Err(DomainError::TicketNotValid {
            full_pnr: ticket.full_pnr.clone(),
            status: ticket.status.as_str().to_string(),
        }
        .into());
    }

    ticket.status = TicketStatus::Used;
    ticket.used_at = Some(now);
    info!(full_pnr = %ticket.full_pnr, "ticket used");
    Ok(ticket)
}

/// Expires a ticket regardless of its validity window.
///
/// Safe to call redundantly; a terminal ticket is left untouched.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for an unknown full PNR or
/// `CoreError::StoreFailure` on store errors.
pub fn mark_ticket_expired<S>(store: &mut S, full_pnr: &str) -> Result<(), CoreError>
where
    S: TicketStore + ?Sized,
{
    let ticket = store
        .find_by_full_pnr(full_pnr)?
        .ok_or_else(|| CoreError::NotFound(format!("ticket {full_pnr}")))?;

    store.mark_expired(ticket.kind, ticket.ticket_id)?;
    debug!(full_pnr = %ticket.full_pnr, "ticket expired");
    Ok(())
}

/// Expires every non-terminal ticket whose validity lapsed before `now`.
///
/// Invoked by an external periodic trigger; safe to run concurrently
/// with read-path lazy expiry since the transition is one-directional.
///
/// # Errors
///
/// Returns `CoreError::StoreFailure` on store errors.
pub fn sweep_expired<S>(store: &mut S, now: OffsetDateTime) -> Result<usize, CoreError>
where
    S: TicketStore + ?Sized,
{
    let count = store.expire_all_lapsed(now)?;
    info!(count, "expiry sweep finished");
    Ok(count)
}
