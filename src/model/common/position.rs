use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The elected offices. Declaration order is the order positions appear on
/// the ballot and in results, and is what `Ord` compares by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "President")]
    President,
    #[serde(rename = "Vice President")]
    VicePresident,
    #[serde(rename = "General Secretary")]
    GeneralSecretary,
    #[serde(rename = "Financial Secretary")]
    FinancialSecretary,
    #[serde(rename = "Treasurer")]
    Treasurer,
    #[serde(rename = "Auditor")]
    Auditor,
    #[serde(rename = "Public Relations Officer")]
    PublicRelationsOfficer,
}

impl Position {
    /// Every position, in ballot order.
    pub const ALL: [Position; 7] = [
        Position::President,
        Position::VicePresident,
        Position::GeneralSecretary,
        Position::FinancialSecretary,
        Position::Treasurer,
        Position::Auditor,
        Position::PublicRelationsOfficer,
    ];

    /// Number of positions a complete ballot must cover.
    pub const COUNT: usize = Self::ALL.len();

    /// The display name, which is also the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::President => "President",
            Position::VicePresident => "Vice President",
            Position::GeneralSecretary => "General Secretary",
            Position::FinancialSecretary => "Financial Secretary",
            Position::Treasurer => "Treasurer",
            Position::Auditor => "Auditor",
            Position::PublicRelationsOfficer => "Public Relations Officer",
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The given text does not name a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown position '{0}'")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Accepts the display name in any case, with surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Position::ALL
            .into_iter()
            .find(|position| position.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParsePositionError(s.to_string()))
    }
}
