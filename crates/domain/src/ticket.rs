// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket status tracking and lifecycle predicates.
//!
//! Each physical seat is one ticket row. Status transitions are monotonic:
//! a non-terminal ticket (`active` or `scheduled`) may become `used`,
//! `expired`, or `cancelled`, and terminal states have no outgoing
//! transitions. Expiry is time-based against the ticket's validity window;
//! marking a ticket expired is idempotent.

use crate::error::DomainError;
use crate::station::Station;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The two booking flavors, stored in parallel tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    /// Valid for one hour from purchase.
    Instant,
    /// Valid for a one-hour window at a chosen future date/time.
    Scheduled,
}

impl BookingKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Scheduled => "scheduled",
        }
    }
}

/// Ticket status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Instant ticket awaiting use within its validity window.
    Active,
    /// Scheduled ticket awaiting its travel window.
    Scheduled,
    /// Consumed at a gate.
    Used,
    /// Validity window lapsed without use.
    Expired,
    /// Voided before use.
    Cancelled,
}

impl TicketStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Scheduled => "scheduled",
            Self::Used => "used",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTicketStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "active" => Ok(Self::Active),
            "scheduled" => Ok(Self::Scheduled),
            "used" => Ok(Self::Used),
            "expired" => Ok(Self::Expired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidTicketStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no outgoing transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Used | Self::Expired | Self::Cancelled)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Active | Self::Scheduled => {
                matches!(new_status, Self::Used | Self::Expired | Self::Cancelled)
            }
            Self::Used | Self::Expired | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by ticket lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One persisted seat: a plain data struct, decoupled from storage.
///
/// Quantity is fixed at one per row; a checkout of N seats is expanded
/// into N rows sharing one base PNR at creation time, so `total_fare`
/// always equals `base_fare` at the row level.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Row identifier assigned by the store.
    pub ticket_id: i64,
    /// Which table the row lives in.
    pub kind: BookingKind,
    /// Shared reference for all seats of one checkout.
    pub base_pnr: String,
    /// 1-based sequence within the base PNR.
    pub ticket_number: u32,
    /// `<base_pnr>-<ticket_number>`.
    pub full_pnr: String,
    /// Origin station.
    pub from_station: Station,
    /// Destination station. Always differs from the origin.
    pub to_station: Station,
    /// Per-ticket fare in taka.
    pub base_fare: u32,
    /// Row total in taka; equals `base_fare` since quantity is one.
    pub total_fare: u32,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// When the checkout happened.
    pub booking_time: OffsetDateTime,
    /// Start of the validity window (the booking time for instant
    /// tickets, the requested travel datetime for scheduled tickets).
    pub valid_from: OffsetDateTime,
    /// End of the validity window.
    pub valid_until: OffsetDateTime,
    /// When the ticket was consumed, if it was.
    pub used_at: Option<OffsetDateTime>,
}

impl Ticket {
    /// Returns true if the validity window has lapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now > self.valid_until
    }

    /// Returns true if the ticket can be consumed at `now`: status is
    /// non-terminal and `now` falls within the validity window.
    #[must_use]
    pub fn is_valid(&self, now: OffsetDateTime) -> bool {
        !self.status.is_terminal() && now >= self.valid_from && now <= self.valid_until
    }

    /// Returns the whole minutes of validity remaining at `now`, zero
    /// once the window has lapsed.
    #[must_use]
    pub fn remaining_minutes(&self, now: OffsetDateTime) -> i64 {
        let remaining = (self.valid_until - now).whole_minutes();
        remaining.max(0)
    }
}
