// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared test fixtures: an in-memory store, a fixed clock, and
//! deterministic digit sources.

mod lifecycle_tests;
mod wallet_tests;

use crate::clock::Clock;
use crate::digits::DigitSource;
use crate::store::{NewCardTransaction, NewTicket, StoreError, TicketStore, WalletStore};
use metro_ticket_domain::{BookingKind, CardTransaction, Ticket, TicketStatus, VirtualCard};
use std::collections::{HashSet, VecDeque};
use time::OffsetDateTime;
use time::macros::datetime;

/// A clock pinned to one instant.
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Default test instant: a Monday morning.
pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 10:00 UTC)
}

/// Returns digit strings from a script, then zero-padded counters.
pub struct ScriptedDigits {
    script: VecDeque<String>,
    counter: u64,
}

impl ScriptedDigits {
    pub fn new(script: &[&str]) -> Self {
        Self {
            script: script.iter().map(ToString::to_string).collect(),
            counter: 0,
        }
    }
}

impl DigitSource for ScriptedDigits {
    fn digits(&mut self, count: usize) -> String {
        if let Some(next) = self.script.pop_front() {
            return next;
        }
        self.counter += 1;
        format!("{:0width$}", self.counter, width = count)
    }
}

/// In-memory store implementing both store traits.
#[derive(Default)]
pub struct InMemoryStore {
    pub tickets: Vec<Ticket>,
    pub inserted_batches: Vec<Vec<NewTicket>>,
    /// Base PNRs treated as taken even without ticket rows.
    pub occupied_pnrs: HashSet<String>,
    /// When set, the next insert fails with this error once.
    pub fail_next_insert: Option<StoreError>,
    next_ticket_id: i64,
    pub cards: Vec<VirtualCard>,
    pub transactions: Vec<CardTransaction>,
    next_card_id: i64,
    next_transaction_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ticket_mut(&mut self, kind: BookingKind, ticket_id: i64) -> Option<&mut Ticket> {
        self.tickets
            .iter_mut()
            .find(|t| t.kind == kind && t.ticket_id == ticket_id)
    }
}

impl TicketStore for InMemoryStore {
    fn base_pnr_exists(&mut self, base_pnr: &str) -> Result<bool, StoreError> {
        Ok(self.occupied_pnrs.contains(base_pnr)
            || self.tickets.iter().any(|t| t.base_pnr == base_pnr))
    }

    fn insert_tickets(&mut self, batch: &[NewTicket]) -> Result<Vec<i64>, StoreError> {
        if let Some(err) = self.fail_next_insert.take() {
            return Err(err);
        }
        if let Some(first) = batch.first()
            && self.base_pnr_exists(&first.base_pnr)?
        {
            return Err(StoreError::UniqueViolation(format!(
                "base PNR {} already exists",
                first.base_pnr
            )));
        }

        let mut ids = Vec::with_capacity(batch.len());
        for row in batch {
            self.next_ticket_id += 1;
            ids.push(self.next_ticket_id);
            self.tickets.push(Ticket {
                ticket_id: self.next_ticket_id,
                kind: row.kind,
                base_pnr: row.base_pnr.clone(),
                ticket_number: row.ticket_number,
                full_pnr: row.full_pnr.clone(),
                from_station: row.from_station,
                to_station: row.to_station,
                base_fare: row.base_fare,
                total_fare: row.total_fare,
                status: row.status,
                booking_time: row.booking_time,
                valid_from: row.valid_from,
                valid_until: row.valid_until,
                used_at: None,
            });
        }
        self.inserted_batches.push(batch.to_vec());
        Ok(ids)
    }

    fn tickets_for_base_pnr(&mut self, base_pnr: &str) -> Result<Vec<Ticket>, StoreError> {
        let mut rows: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|t| t.base_pnr == base_pnr)
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.ticket_number);
        Ok(rows)
    }

    fn find_by_full_pnr(&mut self, full_pnr: &str) -> Result<Option<Ticket>, StoreError> {
        Ok(self
            .tickets
            .iter()
            .find(|t| t.full_pnr == full_pnr)
            .cloned())
    }

    fn mark_used(
        &mut self,
        kind: BookingKind,
        ticket_id: i64,
        used_at: OffsetDateTime,
    ) -> Result<bool, StoreError> {
        match self.ticket_mut(kind, ticket_id) {
            Some(ticket) if !ticket.status.is_terminal() => {
                ticket.status = TicketStatus::Used;
                ticket.used_at = Some(used_at);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(StoreError::NotFound(format!("ticket {ticket_id}"))),
        }
    }

    fn mark_expired(&mut self, kind: BookingKind, ticket_id: i64) -> Result<(), StoreError> {
        match self.ticket_mut(kind, ticket_id) {
            Some(ticket) => {
                if !ticket.status.is_terminal() {
                    ticket.status = TicketStatus::Expired;
                }
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("ticket {ticket_id}"))),
        }
    }

    fn expire_all_lapsed(&mut self, now: OffsetDateTime) -> Result<usize, StoreError> {
        let mut count = 0;
        for ticket in &mut self.tickets {
            if !ticket.status.is_terminal() && now > ticket.valid_until {
                ticket.status = TicketStatus::Expired;
                count += 1;
            }
        }
        Ok(count)
    }
}

impl WalletStore for InMemoryStore {
    fn card_by_email(&mut self, email: &str) -> Result<Option<VirtualCard>, StoreError> {
        Ok(self.cards.iter().find(|c| c.email == email).cloned())
    }

    fn create_card(
        &mut self,
        email: &str,
        created_at: OffsetDateTime,
    ) -> Result<VirtualCard, StoreError> {
        self.next_card_id += 1;
        let card = VirtualCard {
            card_id: self.next_card_id,
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
        };
        self.cards.push(card.clone());
        Ok(card)
    }

    fn card_number_exists(&mut self, card_number: &str) -> Result<bool, StoreError> {
        Ok(self
            .cards
            .iter()
            .any(|c| c.card_number.as_deref() == Some(card_number)))
    }

    fn update_card(&mut self, card: &VirtualCard) -> Result<(), StoreError> {
        match self.cards.iter_mut().find(|c| c.card_id == card.card_id) {
            Some(existing) => {
                *existing = card.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("card {}", card.card_id))),
        }
    }

    fn append_transaction(&mut self, transaction: &NewCardTransaction) -> Result<i64, StoreError> {
        self.next_transaction_id += 1;
        self.transactions.push(CardTransaction {
            transaction_id: self.next_transaction_id,
            card_id: transaction.card_id,
            kind: transaction.kind,
            amount: transaction.amount,
            from_station: transaction.from_station,
            to_station: transaction.to_station,
            created_at: transaction.created_at,
        });
        Ok(self.next_transaction_id)
    }

    fn transactions_for_card(&mut self, card_id: i64) -> Result<Vec<CardTransaction>, StoreError> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.card_id == card_id)
            .cloned()
            .collect())
    }
}
