// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The sixteen stations of the line.
//!
//! Stations are a closed set defined at compile time. Each station carries
//! a stable string identifier (used for persistence and API payloads), a
//! display name, and a 1-based sequential position along the line. The
//! position is used only for ordering in listings; fares come from the
//! fare matrix, never from a distance formula.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of stations on the line.
pub const STATION_COUNT: usize = 16;

/// A station on the line, in line order from north to south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    UttaraNorth,
    UttaraCenter,
    UttaraSouth,
    Pallabi,
    #[serde(rename = "mirpur_11")]
    Mirpur11,
    #[serde(rename = "mirpur_10")]
    Mirpur10,
    Kazipara,
    Shewrapara,
    Agargaon,
    BijoySarani,
    Farmgate,
    KarwanBazar,
    Shahbagh,
    DhakaUniversity,
    BangladeshSecretariat,
    Motijheel,
}

impl Station {
    /// All stations in line order.
    pub const ALL: [Self; STATION_COUNT] = [
        Self::UttaraNorth,
        Self::UttaraCenter,
        Self::UttaraSouth,
        Self::Pallabi,
        Self::Mirpur11,
        Self::Mirpur10,
        Self::Kazipara,
        Self::Shewrapara,
        Self::Agargaon,
        Self::BijoySarani,
        Self::Farmgate,
        Self::KarwanBazar,
        Self::Shahbagh,
        Self::DhakaUniversity,
        Self::BangladeshSecretariat,
        Self::Motijheel,
    ];

    /// Returns the stable string identifier of the station.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UttaraNorth => "uttara_north",
            Self::UttaraCenter => "uttara_center",
            Self::UttaraSouth => "uttara_south",
            Self::Pallabi => "pallabi",
            Self::Mirpur11 => "mirpur_11",
            Self::Mirpur10 => "mirpur_10",
            Self::Kazipara => "kazipara",
            Self::Shewrapara => "shewrapara",
            Self::Agargaon => "agargaon",
            Self::BijoySarani => "bijoy_sarani",
            Self::Farmgate => "farmgate",
            Self::KarwanBazar => "karwan_bazar",
            Self::Shahbagh => "shahbagh",
            Self::DhakaUniversity => "dhaka_university",
            Self::BangladeshSecretariat => "bangladesh_secretariat",
            Self::Motijheel => "motijheel",
        }
    }

    /// Returns the human-readable display name of the station.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::UttaraNorth => "Uttara North",
            Self::UttaraCenter => "Uttara Center",
            Self::UttaraSouth => "Uttara South",
            Self::Pallabi => "Pallabi",
            Self::Mirpur11 => "Mirpur 11",
            Self::Mirpur10 => "Mirpur 10",
            Self::Kazipara => "Kazipara",
            Self::Shewrapara => "Shewrapara",
            Self::Agargaon => "Agargaon",
            Self::BijoySarani => "Bijoy Sarani",
            Self::Farmgate => "Farmgate",
            Self::KarwanBazar => "Karwan Bazar",
            Self::Shahbagh => "Shahbagh",
            Self::DhakaUniversity => "Dhaka University",
            Self::BangladeshSecretariat => "Bangladesh Secretariat",
            Self::Motijheel => "Motijheel",
        }
    }

    /// Returns the 1-based position of the station along the line.
    ///
    /// Positions are a contiguous permutation of 1..=16 and exist for
    /// ordering only.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn position(&self) -> u8 {
        // ALL is in line order, so the index is the position.
        (Self::ALL
            .iter()
            .position(|station| station == self)
            .unwrap_or(0)
            + 1) as u8
    }

    /// Returns the zero-based matrix index of the station.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        usize::from(self.position()) - 1
    }

    /// Parses a station from its string identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownStation` if the identifier does not
    /// name one of the sixteen stations.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .find(|station| station.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::UnknownStation(s.to_string()))
    }
}

impl FromStr for Station {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
