// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod fare;
mod pnr;
mod station;
mod ticket;
mod validation;
mod wallet;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use fare::{DEFAULT_FARE, FareCalculator, FareMatrix, FareQuote};
pub use pnr::{PNR_DIGITS, PNR_PREFIX, is_base_pnr, normalize_pnr, ticket_pnr};
pub use station::{STATION_COUNT, Station};
pub use ticket::{BookingKind, Ticket, TicketStatus};
pub use validation::{
    MAX_QUANTITY, MAX_SCHEDULE_DAYS_AHEAD, MIN_QUANTITY, OPERATING_CLOSE, OPERATING_OPEN,
    validate_declared_fare, validate_payment, validate_quantity, validate_route,
    validate_travel_schedule,
};
pub use wallet::{
    CARD_DIGITS, CARD_PREFIX, CardTransaction, HOLD_BALANCE, TransactionKind, VirtualCard,
};
