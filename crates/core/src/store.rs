// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store traits consumed by the services.
//!
//! The durable store is an injected capability: services never know which
//! backend is behind these traits. The contract mirrors what the services
//! need from persistence: insert-with-unique-constraint, point and ordered
//! lookups, and single-row guarded status updates. Batch ticket inserts
//! are all-or-nothing.

use metro_ticket_domain::{
    BookingKind, CardTransaction, Station, Ticket, TicketStatus, TransactionKind, VirtualCard,
};
use time::OffsetDateTime;

/// Errors surfaced by store implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An insert hit a unique constraint (base PNR or card number race).
    /// The caller may regenerate and retry.
    UniqueViolation(String),
    /// The referenced row does not exist.
    NotFound(String),
    /// Any other backend failure.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::NotFound(what) => write!(f, "Not found: {what}"),
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Insert record for one ticket row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    /// Which table the row goes to.
    pub kind: BookingKind,
    /// Shared checkout reference.
    pub base_pnr: String,
    /// 1-based sequence within the base PNR.
    pub ticket_number: u32,
    /// `<base_pnr>-<ticket_number>`.
    pub full_pnr: String,
    /// Origin station.
    pub from_station: Station,
    /// Destination station.
    pub to_station: Station,
    /// Per-ticket fare in taka.
    pub base_fare: u32,
    /// Row total; equals `base_fare`.
    pub total_fare: u32,
    /// Initial status (`active` for instant, `scheduled` for scheduled).
    pub status: TicketStatus,
    /// Checkout timestamp.
    pub booking_time: OffsetDateTime,
    /// Start of the validity window.
    pub valid_from: OffsetDateTime,
    /// End of the validity window.
    pub valid_until: OffsetDateTime,
    /// Requesting client IP (instant bookings).
    pub client_ip: Option<String>,
    /// Requesting user agent (instant bookings).
    pub user_agent: Option<String>,
    /// Contact phone number (scheduled bookings).
    pub contact_phone: Option<String>,
}

/// Durable ticket storage.
pub trait TicketStore {
    /// Returns true if a base PNR exists in either booking table.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn base_pnr_exists(&mut self, base_pnr: &str) -> Result<bool, StoreError>;

    /// Inserts a batch of ticket rows atomically.
    ///
    /// All rows share one base PNR and land in one table. Either every
    /// row is written or none is.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if the base PNR lost a
    /// generation race, or another error if the insert fails; in both
    /// cases no rows were written.
    fn insert_tickets(&mut self, batch: &[NewTicket]) -> Result<Vec<i64>, StoreError>;

    /// Fetches all ticket rows for a base PNR, ordered by ticket number.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn tickets_for_base_pnr(&mut self, base_pnr: &str) -> Result<Vec<Ticket>, StoreError>;

    /// Fetches a single ticket by its full PNR.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn find_by_full_pnr(&mut self, full_pnr: &str) -> Result<Option<Ticket>, StoreError>;

    /// Marks a ticket used, guarded by a non-terminal status precondition.
    ///
    /// Returns true if the row transitioned, false if another writer got
    /// there first (the transition is one-directional, so losing the race
    /// is benign).
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn mark_used(
        &mut self,
        kind: BookingKind,
        ticket_id: i64,
        used_at: OffsetDateTime,
    ) -> Result<bool, StoreError>;

    /// Marks a ticket expired if it is still non-terminal.
    ///
    /// Safe to call redundantly; a terminal row is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn mark_expired(&mut self, kind: BookingKind, ticket_id: i64) -> Result<(), StoreError>;

    /// Expires every non-terminal ticket whose validity lapsed before
    /// `now` and returns the number of rows transitioned.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn expire_all_lapsed(&mut self, now: OffsetDateTime) -> Result<usize, StoreError>;
}

/// Insert record for one ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCardTransaction {
    /// The card the row belongs to.
    pub card_id: i64,
    /// Payment or trip.
    pub kind: TransactionKind,
    /// Amount in taka.
    pub amount: i64,
    /// Trip origin; `None` for payments.
    pub from_station: Option<Station>,
    /// Trip destination; `None` for payments.
    pub to_station: Option<Station>,
    /// Append timestamp.
    pub created_at: OffsetDateTime,
}

/// Durable virtual-card storage.
pub trait WalletStore {
    /// Fetches a card by cardholder email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn card_by_email(&mut self, email: &str) -> Result<Option<VirtualCard>, StoreError>;

    /// Creates an inactive card row for a cardholder.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate email).
    fn create_card(&mut self, email: &str, created_at: OffsetDateTime)
    -> Result<VirtualCard, StoreError>;

    /// Returns true if a card number is already assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn card_number_exists(&mut self, card_number: &str) -> Result<bool, StoreError>;

    /// Writes back a card's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the card does not exist or the update fails.
    fn update_card(&mut self, card: &VirtualCard) -> Result<(), StoreError>;

    /// Appends one ledger row and returns its id. Ledger rows are never
    /// mutated afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn append_transaction(&mut self, transaction: &NewCardTransaction) -> Result<i64, StoreError>;

    /// Fetches a card's ledger in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn transactions_for_card(&mut self, card_id: i64) -> Result<Vec<CardTransaction>, StoreError>;
}
