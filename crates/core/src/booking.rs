// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking creation.
//!
//! One checkout of N seats becomes N ticket rows sharing a freshly
//! generated base PNR, written as a single atomic batch. Validation runs
//! in full before the base PNR is generated; any failure before the
//! insert leaves no side effects. An insert losing the base-PNR
//! uniqueness race retries with a fresh PNR.

use crate::clock::Clock;
use crate::digits::DigitSource;
use crate::error::CoreError;
use crate::pnr_gen::{MAX_GENERATION_ATTEMPTS, generate_base_pnr};
use crate::store::{NewTicket, StoreError, TicketStore};
use metro_ticket_domain::{
    BookingKind, FareCalculator, FareQuote, Station, TicketStatus, ticket_pnr,
    validate_declared_fare, validate_quantity, validate_route, validate_travel_schedule,
};
use time::{Date, Duration, OffsetDateTime, Time};
use tracing::info;

/// Length of every ticket's validity window.
pub const TICKET_VALIDITY: Duration = Duration::hours(1);

/// Request to buy tickets valid from now.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantBookingRequest {
    /// Origin station.
    pub from_station: Station,
    /// Destination station.
    pub to_station: Station,
    /// Seats to purchase, 1 to 10.
    pub quantity: u32,
    /// Total fare the caller computed client-side; must match ours.
    pub declared_total_fare: f64,
    /// Requesting client IP, recorded on every row.
    pub client_ip: Option<String>,
    /// Requesting user agent, recorded on every row.
    pub user_agent: Option<String>,
}

/// Request to buy tickets for a future travel window.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledBookingRequest {
    /// Origin station.
    pub from_station: Station,
    /// Destination station.
    pub to_station: Station,
    /// Seats to purchase, 1 to 10.
    pub quantity: u32,
    /// Total fare the caller computed client-side; must match ours.
    pub declared_total_fare: f64,
    /// Requested travel date, today to 30 days ahead.
    pub travel_date: Date,
    /// Requested departure time, within operating hours.
    pub travel_time: Time,
    /// Contact phone number, recorded on every row.
    pub contact_phone: String,
}

/// What a successful checkout returns to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    /// Shared reference for the whole checkout.
    pub base_pnr: String,
    /// Instant or scheduled.
    pub kind: BookingKind,
    /// Store ids of the created rows, in ticket-number order.
    pub ticket_ids: Vec<i64>,
    /// Full PNRs in ticket-number order.
    pub full_pnrs: Vec<String>,
    /// Origin station.
    pub from_station: Station,
    /// Destination station.
    pub to_station: Station,
    /// Number of seats created.
    pub quantity: u32,
    /// Per-ticket fare in taka.
    pub base_fare: u32,
    /// Checkout total in taka.
    pub total_fare: u32,
    /// When the checkout happened.
    pub booking_time: OffsetDateTime,
    /// Start of the validity window.
    pub valid_from: OffsetDateTime,
    /// End of the validity window.
    pub valid_until: OffsetDateTime,
}

/// Computes the per-ticket and total fare for a prospective checkout.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` for a same-station route or an
/// out-of-range quantity.
pub fn calculate_fare(
    calculator: &FareCalculator,
    from_station: Station,
    to_station: Station,
    quantity: u32,
) -> Result<FareQuote, CoreError> {
    validate_route(from_station, to_station)?;
    validate_quantity(quantity)?;
    Ok(calculator.total_fare(from_station, to_station, quantity))
}

/// Creates an instant booking valid for one hour from now.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` for invalid input or a fare
/// mismatch (nothing written), or `CoreError::StoreFailure` if the store
/// rejects the batch.
pub fn create_instant_booking<S, C, D>(
    store: &mut S,
    clock: &C,
    digits: &mut D,
    calculator: &FareCalculator,
    request: &InstantBookingRequest,
) -> Result<BookingSummary, CoreError>
where
    S: TicketStore + ?Sized,
    C: Clock + ?Sized,
    D: DigitSource + ?Sized,
{
    let quote = validate_common(
        calculator,
        request.from_station,
        request.to_station,
        request.quantity,
        request.declared_total_fare,
    )?;

    let booking_time = clock.now();
    let valid_from = booking_time;
    let valid_until = booking_time + TICKET_VALIDITY;

    persist_booking(
        store,
        digits,
        BookingPlan {
            kind: BookingKind::Instant,
            status: TicketStatus::Active,
            from_station: request.from_station,
            to_station: request.to_station,
            quantity: request.quantity,
            quote,
            booking_time,
            valid_from,
            valid_until,
            client_ip: request.client_ip.clone(),
            user_agent: request.user_agent.clone(),
            contact_phone: None,
        },
    )
}

/// Creates a scheduled booking valid for one hour from the requested
/// travel datetime.
///
/// The travel time must fall within operating hours and the date within
/// the booking horizon; the service re-validates both rather than
/// trusting the caller.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` for invalid input, an
/// out-of-window schedule, or a fare mismatch (nothing written), or
/// `CoreError::StoreFailure` if the store rejects the batch.
pub fn create_scheduled_booking<S, C, D>(
    store: &mut S,
    clock: &C,
    digits: &mut D,
    calculator: &FareCalculator,
    request: &ScheduledBookingRequest,
) -> Result<BookingSummary, CoreError>
where
    S: TicketStore + ?Sized,
    C: Clock + ?Sized,
    D: DigitSource + ?Sized,
{
    let quote = validate_common(
        calculator,
        request.from_station,
        request.to_station,
        request.quantity,
        request.declared_total_fare,
    )?;

    let booking_time = clock.now();
    validate_travel_schedule(request.travel_date, request.travel_time, booking_time)?;

    let valid_from = request.travel_date.with_time(request.travel_time).assume_utc();
    let valid_until = valid_from + TICKET_VALIDITY;

    persist_booking(
        store,
        digits,
        BookingPlan {
            kind: BookingKind::Scheduled,
            status: TicketStatus::Scheduled,
            from_station: request.from_station,
            to_station: request.to_station,
            quantity: request.quantity,
            quote,
            booking_time,
            valid_from,
            valid_until,
            client_ip: None,
            user_agent: None,
            contact_phone: Some(request.contact_phone.clone()),
        },
    )
}

fn validate_common(
    calculator: &FareCalculator,
    from_station: Station,
    to_station: Station,
    quantity: u32,
    declared_total_fare: f64,
) -> Result<FareQuote, CoreError> {
    validate_route(from_station, to_station)?;
    validate_quantity(quantity)?;
    let quote = calculator.total_fare(from_station, to_station, quantity);
    validate_declared_fare(declared_total_fare, quote.total_fare)?;
    Ok(quote)
}

/// Everything needed to materialize one checkout's rows.
struct BookingPlan {
    kind: BookingKind,
    status: TicketStatus,
    from_station: Station,
    to_station: Station,
    quantity: u32,
    quote: FareQuote,
    booking_time: OffsetDateTime,
    valid_from: OffsetDateTime,
    valid_until: OffsetDateTime,
    client_ip: Option<String>,
    user_agent: Option<String>,
    contact_phone: Option<String>,
}

fn persist_booking<S, D>(
    store: &mut S,
    digits: &mut D,
    plan: BookingPlan,
) -> Result<BookingSummary, CoreError>
where
    S: TicketStore + ?Sized,
    D: DigitSource + ?Sized,
{
    // The existence pre-check and the unique constraint together form the
    // collision handling: a concurrent checkout that wins the insert race
    // surfaces as UniqueViolation here, and we retry with a fresh PNR.
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let base_pnr = generate_base_pnr(digits, |candidate| store.base_pnr_exists(candidate))?;
        let batch = build_batch(&base_pnr, &plan);

        match store.insert_tickets(&batch) {
            Ok(ticket_ids) => {
                info!(
                    base_pnr = %base_pnr,
                    kind = plan.kind.as_str(),
                    quantity = plan.quantity,
                    total_fare = plan.quote.total_fare,
                    "booking created"
                );
                return Ok(BookingSummary {
                    full_pnrs: batch.into_iter().map(|row| row.full_pnr).collect(),
                    base_pnr,
                    kind: plan.kind,
                    ticket_ids,
                    from_station: plan.from_station,
                    to_station: plan.to_station,
                    quantity: plan.quantity,
                    base_fare: plan.quote.base_fare,
                    total_fare: plan.quote.total_fare,
                    booking_time: plan.booking_time,
                    valid_from: plan.valid_from,
                    valid_until: plan.valid_until,
                });
            }
            Err(StoreError::UniqueViolation(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }

    Err(CoreError::StoreFailure(format!(
        "exhausted {MAX_GENERATION_ATTEMPTS} attempts inserting a booking with a unique base PNR"
    )))
}

fn build_batch(base_pnr: &str, plan: &BookingPlan) -> Vec<NewTicket> {
    (1..=plan.quantity)
        .map(|ticket_number| NewTicket {
            kind: plan.kind,
            base_pnr: base_pnr.to_string(),
            ticket_number,
            full_pnr: ticket_pnr(base_pnr, ticket_number),
            from_station: plan.from_station,
            to_station: plan.to_station,
            base_fare: plan.quote.base_fare,
            total_fare: plan.quote.base_fare,
            status: plan.status,
            booking_time: plan.booking_time,
            valid_from: plan.valid_from,
            valid_until: plan.valid_until,
            client_ip: plan.client_ip.clone(),
            user_agent: plan.user_agent.clone(),
            contact_phone: plan.contact_phone.clone(),
        })
        .collect()
}
