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

mod booking;
mod clock;
mod digits;
mod error;
mod lifecycle;
mod pnr_gen;
mod store;
mod verification;
mod wallet;

#[cfg(test)]
mod tests;

pub use booking::{
    BookingSummary, InstantBookingRequest, ScheduledBookingRequest, TICKET_VALIDITY,
    calculate_fare, create_instant_booking, create_scheduled_booking,
};
pub use clock::{Clock, SystemClock};
pub use digits::{DigitSource, ThreadRngDigits};
pub use error::CoreError;
pub use lifecycle::{mark_ticket_expired, mark_ticket_used, sweep_expired};
pub use pnr_gen::{MAX_GENERATION_ATTEMPTS, generate_base_pnr, generate_card_number};
pub use store::{NewCardTransaction, NewTicket, StoreError, TicketStore, WalletStore};
pub use verification::{BookingView, TicketDetail, lookup_by_pnr};
pub use wallet::{PaymentReceipt, TripReceipt, process_payment, record_trip};
