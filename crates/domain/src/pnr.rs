// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PNR formats.
//!
//! A base PNR identifies one checkout: the literal prefix followed by nine
//! decimal digits, leading zeros preserved. Each seat gets a full PNR of
//! the form `<base>-<ticket_number>`. Uniqueness of the base PNR is the
//! generator's concern (see the core crate); this module only defines the
//! shapes.

use crate::error::DomainError;

/// Literal prefix of every base PNR.
pub const PNR_PREFIX: &str = "MRT";

/// Number of decimal digits following the prefix.
pub const PNR_DIGITS: usize = 9;

/// Returns true if the string is a well-formed base PNR.
#[must_use]
pub fn is_base_pnr(s: &str) -> bool {
    s.len() == PNR_PREFIX.len() + PNR_DIGITS
        && s.starts_with(PNR_PREFIX)
        && s[PNR_PREFIX.len()..].bytes().all(|b| b.is_ascii_digit())
}

/// Builds the full PNR for one seat within a base booking.
///
/// Ticket numbers are 1-based and sequential within the base PNR.
#[must_use]
pub fn ticket_pnr(base_pnr: &str, ticket_number: u32) -> String {
    format!("{base_pnr}-{ticket_number}")
}

/// Normalizes a base or full PNR to its base PNR.
///
/// A trailing `-<digits>` suffix is stripped, so looking up any seat's
/// full PNR resolves to the same booking as the base PNR.
///
/// # Errors
///
/// Returns `DomainError::InvalidPnr` if the input is neither a base PNR
/// nor a full PNR.
pub fn normalize_pnr(pnr: &str) -> Result<String, DomainError> {
    let trimmed = pnr.trim();
    if is_base_pnr(trimmed) {
        return Ok(trimmed.to_string());
    }
    if let Some((base, suffix)) = trimmed.rsplit_once('-')
        && is_base_pnr(base)
        && !suffix.is_empty()
        && suffix.bytes().all(|b| b.is_ascii_digit())
    {
        return Ok(base.to_string());
    }
    Err(DomainError::InvalidPnr(pnr.to_string()))
}
