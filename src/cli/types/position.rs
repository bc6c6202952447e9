//! Playing position types and provider-label mapping.

use crate::error::ScoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playing positions tracked in the roster.
///
/// The provider reports positions as free-text labels ("Goalkeeper",
/// "Attacker", ...). Anything it reports that we do not recognize lands on
/// [`Position::Utility`] so an import can never fail on an odd label.
///
/// # Examples
///
/// ```rust
/// use scoutia::Position;
///
/// assert_eq!(Position::from_provider_label("Attacker"), Position::Attacker);
/// assert_eq!(Position::from_provider_label("Libero"), Position::Utility);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
    /// Generic fallback for unmapped or missing provider labels.
    Utility,
}

impl Position {
    /// Map a provider position label to an internal position.
    ///
    /// Total function: unmapped labels (including strings that are already
    /// internal short codes) fall back to [`Position::Utility`].
    pub fn from_provider_label(label: &str) -> Self {
        match label {
            "Goalkeeper" => Position::Goalkeeper,
            "Defender" => Position::Defender,
            "Midfielder" => Position::Midfielder,
            "Attacker" => Position::Attacker,
            _ => Position::Utility,
        }
    }

    /// Short code used in listings and database rows.
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Attacker => "FW",
            Position::Utility => "UT",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Attacker => "Attacker",
            Position::Utility => "Utility",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" | "GOALKEEPER" => Ok(Position::Goalkeeper),
            "DF" | "DEFENDER" => Ok(Position::Defender),
            "MF" | "MIDFIELDER" => Ok(Position::Midfielder),
            "FW" | "ATTACKER" | "FORWARD" => Ok(Position::Attacker),
            "UT" | "UTILITY" => Ok(Position::Utility),
            _ => Err(ScoutError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
