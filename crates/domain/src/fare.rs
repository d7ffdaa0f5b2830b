// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The station-to-station fare matrix and fare calculation.
//!
//! Fares are a lookup table, not a distance formula. The seed table lists
//! one entry per unordered station pair; construction populates both
//! directed entries so each direction is an independent matrix cell. The
//! published table is symmetric by construction, but nothing in this
//! module assumes symmetry.
//!
//! A pair absent from the matrix resolves to [`DEFAULT_FARE`]. The strict
//! lookup variant surfaces the absence instead, for callers that prefer a
//! hard failure over the lenient fallback.

use crate::error::DomainError;
use crate::station::{STATION_COUNT, Station};

/// Fare returned for any station pair absent from the matrix, in taka.
pub const DEFAULT_FARE: u32 = 20;

/// Seed fares in taka, one entry per unordered station pair.
const FARE_SEED: &[(Station, Station, u32)] = &[
    (Station::UttaraNorth, Station::UttaraCenter, 20),
    (Station::UttaraNorth, Station::UttaraSouth, 20),
    (Station::UttaraNorth, Station::Pallabi, 30),
    (Station::UttaraNorth, Station::Mirpur11, 30),
    (Station::UttaraNorth, Station::Mirpur10, 40),
    (Station::UttaraNorth, Station::Kazipara, 40),
    (Station::UttaraNorth, Station::Shewrapara, 50),
    (Station::UttaraNorth, Station::Agargaon, 60),
    (Station::UttaraNorth, Station::BijoySarani, 60),
    (Station::UttaraNorth, Station::Farmgate, 70),
    (Station::UttaraNorth, Station::KarwanBazar, 80),
    (Station::UttaraNorth, Station::Shahbagh, 80),
    (Station::UttaraNorth, Station::DhakaUniversity, 90),
    (Station::UttaraNorth, Station::BangladeshSecretariat, 90),
    (Station::UttaraNorth, Station::Motijheel, 100),
    (Station::UttaraCenter, Station::UttaraSouth, 20),
    (Station::UttaraCenter, Station::Pallabi, 20),
    (Station::UttaraCenter, Station::Mirpur11, 30),
    (Station::UttaraCenter, Station::Mirpur10, 30),
    (Station::UttaraCenter, Station::Kazipara, 40),
    (Station::UttaraCenter, Station::Shewrapara, 40),
    (Station::UttaraCenter, Station::Agargaon, 50),
    (Station::UttaraCenter, Station::BijoySarani, 60),
    (Station::UttaraCenter, Station::Farmgate, 60),
    (Station::UttaraCenter, Station::KarwanBazar, 70),
    (Station::UttaraCenter, Station::Shahbagh, 80),
    (Station::UttaraCenter, Station::DhakaUniversity, 80),
    (Station::UttaraCenter, Station::BangladeshSecretariat, 90),
    (Station::UttaraCenter, Station::Motijheel, 90),
    (Station::UttaraSouth, Station::Pallabi, 20),
    (Station::UttaraSouth, Station::Mirpur11, 20),
    (Station::UttaraSouth, Station::Mirpur10, 30),
    (Station::UttaraSouth, Station::Kazipara, 30),
    (Station::UttaraSouth, Station::Shewrapara, 40),
    (Station::UttaraSouth, Station::Agargaon, 40),
    (Station::UttaraSouth, Station::BijoySarani, 50),
    (Station::UttaraSouth, Station::Farmgate, 60),
    (Station::UttaraSouth, Station::KarwanBazar, 60),
    (Station::UttaraSouth, Station::Shahbagh, 70),
    (Station::UttaraSouth, Station::DhakaUniversity, 80),
    (Station::UttaraSouth, Station::BangladeshSecretariat, 80),
    (Station::UttaraSouth, Station::Motijheel, 90),
    (Station::Pallabi, Station::Mirpur11, 20),
    (Station::Pallabi, Station::Mirpur10, 20),
    (Station::Pallabi, Station::Kazipara, 30),
    (Station::Pallabi, Station::Shewrapara, 30),
    (Station::Pallabi, Station::Agargaon, 40),
    (Station::Pallabi, Station::BijoySarani, 40),
    (Station::Pallabi, Station::Farmgate, 50),
    (Station::Pallabi, Station::KarwanBazar, 60),
    (Station::Pallabi, Station::Shahbagh, 60),
    (Station::Pallabi, Station::DhakaUniversity, 70),
    (Station::Pallabi, Station::BangladeshSecretariat, 80),
    (Station::Pallabi, Station::Motijheel, 80),
    (Station::Mirpur11, Station::Mirpur10, 20),
    (Station::Mirpur11, Station::Kazipara, 20),
    (Station::Mirpur11, Station::Shewrapara, 30),
    (Station::Mirpur11, Station::Agargaon, 30),
    (Station::Mirpur11, Station::BijoySarani, 40),
    (Station::Mirpur11, Station::Farmgate, 40),
    (Station::Mirpur11, Station::KarwanBazar, 50),
    (Station::Mirpur11, Station::Shahbagh, 60),
    (Station::Mirpur11, Station::DhakaUniversity, 60),
    (Station::Mirpur11, Station::BangladeshSecretariat, 70),
    (Station::Mirpur11, Station::Motijheel, 80),
    (Station::Mirpur10, Station::Kazipara, 20),
    (Station::Mirpur10, Station::Shewrapara, 20),
    (Station::Mirpur10, Station::Agargaon, 30),
    (Station::Mirpur10, Station::BijoySarani, 30),
    (Station::Mirpur10, Station::Farmgate, 40),
    (Station::Mirpur10, Station::KarwanBazar, 40),
    (Station::Mirpur10, Station::Shahbagh, 50),
    (Station::Mirpur10, Station::DhakaUniversity, 60),
    (Station::Mirpur10, Station::BangladeshSecretariat, 60),
    (Station::Mirpur10, Station::Motijheel, 70),
    (Station::Kazipara, Station::Shewrapara, 20),
    (Station::Kazipara, Station::Agargaon, 20),
    (Station::Kazipara, Station::BijoySarani, 30),
    (Station::Kazipara, Station::Farmgate, 30),
    (Station::Kazipara, Station::KarwanBazar, 40),
    (Station::Kazipara, Station::Shahbagh, 40),
    (Station::Kazipara, Station::DhakaUniversity, 50),
    (Station::Kazipara, Station::BangladeshSecretariat, 60),
    (Station::Kazipara, Station::Motijheel, 60),
    (Station::Shewrapara, Station::Agargaon, 20),
    (Station::Shewrapara, Station::BijoySarani, 20),
    (Station::Shewrapara, Station::Farmgate, 30),
    (Station::Shewrapara, Station::KarwanBazar, 30),
    (Station::Shewrapara, Station::Shahbagh, 40),
    (Station::Shewrapara, Station::DhakaUniversity, 40),
    (Station::Shewrapara, Station::BangladeshSecretariat, 50),
    (Station::Shewrapara, Station::Motijheel, 60),
    (Station::Agargaon, Station::BijoySarani, 20),
    (Station::Agargaon, Station::Farmgate, 20),
    (Station::Agargaon, Station::KarwanBazar, 30),
    (Station::Agargaon, Station::Shahbagh, 30),
    (Station::Agargaon, Station::DhakaUniversity, 40),
    (Station::Agargaon, Station::BangladeshSecretariat, 40),
    (Station::Agargaon, Station::Motijheel, 50),
    (Station::BijoySarani, Station::Farmgate, 20),
    (Station::BijoySarani, Station::KarwanBazar, 20),
    (Station::BijoySarani, Station::Shahbagh, 30),
    (Station::BijoySarani, Station::DhakaUniversity, 30),
    (Station::BijoySarani, Station::BangladeshSecretariat, 40),
    (Station::BijoySarani, Station::Motijheel, 40),
    (Station::Farmgate, Station::KarwanBazar, 20),
    (Station::Farmgate, Station::Shahbagh, 20),
    (Station::Farmgate, Station::DhakaUniversity, 30),
    (Station::Farmgate, Station::BangladeshSecretariat, 30),
    (Station::Farmgate, Station::Motijheel, 40),
    (Station::KarwanBazar, Station::Shahbagh, 20),
    (Station::KarwanBazar, Station::DhakaUniversity, 20),
    (Station::KarwanBazar, Station::BangladeshSecretariat, 30),
    (Station::KarwanBazar, Station::Motijheel, 30),
    (Station::Shahbagh, Station::DhakaUniversity, 20),
    (Station::Shahbagh, Station::BangladeshSecretariat, 20),
    (Station::Shahbagh, Station::Motijheel, 30),
    (Station::DhakaUniversity, Station::BangladeshSecretariat, 20),
    (Station::DhakaUniversity, Station::Motijheel, 20),
    (Station::BangladeshSecretariat, Station::Motijheel, 20),
];

/// An immutable fare table over directed station pairs.
///
/// Built once at startup and injected wherever fares are computed. Missing
/// cells fall back to [`DEFAULT_FARE`] on lenient lookup.
#[derive(Debug, Clone)]
pub struct FareMatrix {
    cells: [[Option<u32>; STATION_COUNT]; STATION_COUNT],
}

impl FareMatrix {
    /// Builds the matrix from the seed table, populating both directions
    /// of every seeded pair.
    #[must_use]
    pub fn from_seed() -> Self {
        Self::with_entries(FARE_SEED)
    }

    /// Builds a matrix from explicit directed-pair entries.
    ///
    /// Each entry populates both directions. Intended for the seed table
    /// and for tests that need a sparse matrix.
    #[must_use]
    pub fn with_entries(entries: &[(Station, Station, u32)]) -> Self {
        let mut cells = [[None; STATION_COUNT]; STATION_COUNT];
        for &(from, to, fare) in entries {
            cells[from.index()][to.index()] = Some(fare);
            cells[to.index()][from.index()] = Some(fare);
        }
        Self { cells }
    }

    /// Returns the fare for the directed pair, if an entry exists.
    #[must_use]
    pub fn get(&self, from: Station, to: Station) -> Option<u32> {
        self.cells[from.index()][to.index()]
    }
}

impl Default for FareMatrix {
    fn default() -> Self {
        Self::from_seed()
    }
}

/// A per-ticket and total fare for a requested quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareQuote {
    /// Fare for one ticket, in taka.
    pub base_fare: u32,
    /// Fare for the whole quantity, in taka.
    pub total_fare: u32,
}

/// Pure fare computation over an injected [`FareMatrix`].
///
/// The calculator performs no input validation; route and quantity bounds
/// are the caller's responsibility (see the `validation` module).
#[derive(Debug, Clone)]
pub struct FareCalculator {
    matrix: FareMatrix,
}

impl FareCalculator {
    /// Creates a calculator over the given matrix.
    #[must_use]
    pub const fn new(matrix: FareMatrix) -> Self {
        Self { matrix }
    }

    /// Returns the fare for the directed pair, falling back to
    /// [`DEFAULT_FARE`] when no entry exists.
    #[must_use]
    pub fn fare(&self, from: Station, to: Station) -> u32 {
        self.matrix.get(from, to).unwrap_or(DEFAULT_FARE)
    }

    /// Returns the fare for the directed pair, failing when no entry
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::FareUnavailable` if the matrix has no entry
    /// for the pair.
    pub fn fare_strict(&self, from: Station, to: Station) -> Result<u32, DomainError> {
        self.matrix
            .get(from, to)
            .ok_or(DomainError::FareUnavailable { from, to })
    }

    /// Returns the per-ticket and total fare for a quantity.
    ///
    /// Total fare is linear in quantity. Quantity bounds are not checked
    /// here.
    #[must_use]
    pub fn total_fare(&self, from: Station, to: Station, quantity: u32) -> FareQuote {
        let base_fare = self.fare(from, to);
        FareQuote {
            base_fare,
            total_fare: base_fare * quantity,
        }
    }
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self::new(FareMatrix::from_seed())
    }
}
