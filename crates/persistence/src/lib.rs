// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the metro ticketing core.
//!
//! This crate provides `SQLite` persistence for ticket bookings and
//! virtual cards, built on Diesel with embedded migrations. The
//! `Persistence` adapter implements the `TicketStore` and `WalletStore`
//! traits from the core crate, so the booking, lifecycle, verification,
//! and wallet services run unchanged against it.
//!
//! ## Storage model
//!
//! - Instant and scheduled bookings live in parallel tables with the
//!   same core columns; a checkout of N seats is N rows sharing one
//!   base PNR.
//! - Unique constraints on `full_pnr` and `(base_pnr, ticket_number)`
//!   back the booking service's collision retry.
//! - Timestamps are stored as RFC 3339 UTC text with whole-second
//!   precision.
//!
//! ## Testing
//!
//! In-memory databases get a unique name from an atomic counter, so
//! each `new_in_memory()` call is an isolated database and tests never
//! collide. File-backed databases run in WAL mode.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

use metro_ticket::{
    NewCardTransaction, NewTicket, StoreError, TicketStore, WalletStore,
};
use metro_ticket_domain::{BookingKind, CardTransaction, Ticket, VirtualCard};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed store for tickets and virtual cards.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure referential
    /// integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }
}

impl TicketStore for Persistence {
    fn base_pnr_exists(&mut self, base_pnr: &str) -> Result<bool, StoreError> {
        Ok(queries::tickets::base_pnr_exists(&mut self.conn, base_pnr)?)
    }

    fn insert_tickets(&mut self, batch: &[NewTicket]) -> Result<Vec<i64>, StoreError> {
        Ok(mutations::tickets::insert_tickets(&mut self.conn, batch)?)
    }

    fn tickets_for_base_pnr(&mut self, base_pnr: &str) -> Result<Vec<Ticket>, StoreError> {
        Ok(queries::tickets::tickets_for_base_pnr(
            &mut self.conn,
            base_pnr,
        )?)
    }

    fn find_by_full_pnr(&mut self, full_pnr: &str) -> Result<Option<Ticket>, StoreError> {
        Ok(queries::tickets::find_by_full_pnr(&mut self.conn, full_pnr)?)
    }

    fn mark_used(
        &mut self,
        kind: BookingKind,
        ticket_id: i64,
        used_at: OffsetDateTime,
    ) -> Result<bool, StoreError> {
        Ok(mutations::tickets::mark_used(
            &mut self.conn,
            kind,
            ticket_id,
            used_at,
        )?)
    }

    fn mark_expired(&mut self, kind: BookingKind, ticket_id: i64) -> Result<(), StoreError> {
        Ok(mutations::tickets::mark_expired(
            &mut self.conn,
            kind,
            ticket_id,
        )?)
    }

    fn expire_all_lapsed(&mut self, now: OffsetDateTime) -> Result<usize, StoreError> {
        Ok(mutations::tickets::expire_all_lapsed(&mut self.conn, now)?)
    }
}

impl WalletStore for Persistence {
    fn card_by_email(&mut self, email: &str) -> Result<Option<VirtualCard>, StoreError> {
        Ok(queries::wallet::card_by_email(&mut self.conn, email)?)
    }

    fn create_card(
        &mut self,
        email: &str,
        created_at: OffsetDateTime,
    ) -> Result<VirtualCard, StoreError> {
        Ok(mutations::wallet::create_card(
            &mut self.conn,
            email,
            created_at,
        )?)
    }

    fn card_number_exists(&mut self, card_number: &str) -> Result<bool, StoreError> {
        Ok(queries::wallet::card_number_exists(
            &mut self.conn,
            card_number,
        )?)
    }

    fn update_card(&mut self, card: &VirtualCard) -> Result<(), StoreError> {
        Ok(mutations::wallet::update_card(&mut self.conn, card)?)
    }

    fn append_transaction(&mut self, transaction: &NewCardTransaction) -> Result<i64, StoreError> {
        Ok(mutations::wallet::append_transaction(
            &mut self.conn,
            transaction,
        )?)
    }

    fn transactions_for_card(&mut self, card_id: i64) -> Result<Vec<CardTransaction>, StoreError> {
        Ok(queries::wallet::transactions_for_card(
            &mut self.conn,
            card_id,
        )?)
    }
}
