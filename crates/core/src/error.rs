// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use metro_ticket_domain::DomainError;

/// Errors that can occur during service operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requested booking, ticket, or card does not exist.
    NotFound(String),
    /// The durable store failed; no partial effects were applied.
    StoreFailure(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotFound(what) => write!(f, "Not found: {what}"),
            Self::StoreFailure(msg) => write!(f, "Store failure: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::UniqueViolation(msg) | StoreError::Backend(msg) => Self::StoreFailure(msg),
        }
    }
}
