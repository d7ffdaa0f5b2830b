// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::station::Station;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Station identifier is not one of the sixteen line stations.
    UnknownStation(String),
    /// Origin and destination are the same station.
    SameStationRoute(Station),
    /// Ticket quantity is outside the permitted range.
    InvalidQuantity {
        /// The requested quantity.
        quantity: u32,
        /// The inclusive minimum.
        min: u32,
        /// The inclusive maximum.
        max: u32,
    },
    /// Caller-declared total fare disagrees with the computed total.
    FareMismatch {
        /// The fare declared by the caller.
        declared: f64,
        /// The fare computed from the matrix.
        computed: u32,
    },
    /// No fare entry exists for the pair (strict lookup only).
    FareUnavailable {
        /// The origin station.
        from: Station,
        /// The destination station.
        to: Station,
    },
    /// Ticket status string is not a valid status.
    InvalidTicketStatus(String),
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not allowed.
        reason: String,
    },
    /// Ticket is not in a state (or time window) that permits the operation.
    TicketNotValid {
        /// The ticket's full PNR.
        full_pnr: String,
        /// The ticket's current status.
        status: String,
    },
    /// Requested travel time is outside operating hours.
    InvalidTravelTime {
        /// The requested time of day.
        requested: time::Time,
    },
    /// Requested travel date is in the past or beyond the booking horizon.
    TravelDateOutOfRange {
        /// The requested travel date.
        requested: time::Date,
        /// The maximum number of days ahead a booking may be made.
        max_days_ahead: i64,
    },
    /// Payment or trip amount is not acceptable.
    InvalidAmount {
        /// The offending amount.
        amount: i64,
        /// Why the amount was rejected.
        reason: String,
    },
    /// Payment method is empty.
    InvalidPaymentMethod,
    /// Wallet balance cannot cover the trip.
    InsufficientBalance {
        /// The available balance.
        balance: i64,
        /// The amount required.
        required: i64,
    },
    /// PNR string does not match the expected format.
    InvalidPnr(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStation(id) => write!(f, "Unknown station: '{id}'"),
            Self::SameStationRoute(station) => {
                write!(
                    f,
                    "Origin and destination are both '{}'",
                    station.display_name()
                )
            }
            Self::InvalidQuantity { quantity, min, max } => {
                write!(
                    f,
                    "Invalid ticket quantity: {quantity}. Must be between {min} and {max}"
                )
            }
            Self::FareMismatch { declared, computed } => {
                write!(
                    f,
                    "Declared total fare {declared:.2} does not match computed fare {computed}"
                )
            }
            Self::FareUnavailable { from, to } => {
                write!(
                    f,
                    "No fare entry for {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::InvalidTicketStatus(status) => {
                write!(f, "Invalid ticket status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition ticket from {from} to {to}: {reason}")
            }
            Self::TicketNotValid { full_pnr, status } => {
                write!(f, "Ticket {full_pnr} is not valid for use (status: {status})")
            }
            Self::InvalidTravelTime { requested } => {
                write!(f, "Travel time {requested} is outside operating hours")
            }
            Self::TravelDateOutOfRange {
                requested,
                max_days_ahead,
            } => {
                write!(
                    f,
                    "Travel date {requested} must be today or within {max_days_ahead} days"
                )
            }
            Self::InvalidAmount { amount, reason } => {
                write!(f, "Invalid amount {amount}: {reason}")
            }
            Self::InvalidPaymentMethod => write!(f, "Payment method must not be empty"),
            Self::InsufficientBalance { balance, required } => {
                write!(
                    f,
                    "Insufficient balance: {balance} available, {required} required"
                )
            }
            Self::InvalidPnr(pnr) => write!(f, "Invalid PNR: '{pnr}'"),
        }
    }
}

impl std::error::Error for DomainError {}
