// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unique reference generation.
//!
//! Base PNRs and card numbers are random digit strings behind a fixed
//! prefix, generated with retry-until-unique against an injected
//! existence check. Uniqueness under concurrent requests is ultimately
//! enforced by the store's unique constraint; the insert path retries on
//! a constraint violation the same way this pre-check retries.

use crate::digits::DigitSource;
use crate::error::CoreError;
use crate::store::StoreError;
use metro_ticket_domain::{CARD_DIGITS, CARD_PREFIX, PNR_DIGITS, PNR_PREFIX};

/// Upper bound on uniqueness retries before giving up.
///
/// With nine random digits a collision is already improbable; the cap
/// only guards against a pathological store or RNG stub.
pub const MAX_GENERATION_ATTEMPTS: usize = 20;

fn generate_unique<D, F>(
    digits: &mut D,
    prefix: &str,
    digit_count: usize,
    mut exists: F,
    what: &str,
) -> Result<String, CoreError>
where
    D: DigitSource + ?Sized,
    F: FnMut(&str) -> Result<bool, StoreError>,
{
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let candidate = format!("{prefix}{}", digits.digits(digit_count));
        if !exists(&candidate)? {
            return Ok(candidate);
        }
    }
    Err(CoreError::StoreFailure(format!(
        "exhausted {MAX_GENERATION_ATTEMPTS} attempts generating a unique {what}"
    )))
}

/// Generates a base PNR absent from both booking tables.
///
/// # Errors
///
/// Returns `CoreError::StoreFailure` if the existence check fails or the
/// retry cap is exhausted.
pub fn generate_base_pnr<D, F>(digits: &mut D, exists: F) -> Result<String, CoreError>
where
    D: DigitSource + ?Sized,
    F: FnMut(&str) -> Result<bool, StoreError>,
{
    generate_unique(digits, PNR_PREFIX, PNR_DIGITS, exists, "base PNR")
}

/// Generates a card number not yet assigned to any card.
///
/// # Errors
///
/// Returns `CoreError::StoreFailure` if the existence check fails or the
/// retry cap is exhausted.
pub fn generate_card_number<D, F>(digits: &mut D, exists: F) -> Result<String, CoreError>
where
    D: DigitSource + ?Sized,
    F: FnMut(&str) -> Result<bool, StoreError>,
{
    generate_unique(digits, CARD_PREFIX, CARD_DIGITS, exists, "card number")
}
