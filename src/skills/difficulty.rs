//! Difficulty tiers and their base relative levels

use crate::core::error::ProficiencyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much proficiency a point investment buys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Average,
    Hard,
    VeryHard,
    /// Wildcard skills cost triple; only every third point counts
    Wildcard,
}

impl Difficulty {
    /// Get all difficulties
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Average,
            Difficulty::Hard,
            Difficulty::VeryHard,
            Difficulty::Wildcard,
        ]
    }

    /// Relative level bought by exactly one point
    pub fn base_relative_level(&self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Average => -1,
            Difficulty::Hard => -2,
            Difficulty::VeryHard | Difficulty::Wildcard => -3,
        }
    }

    /// Short sheet notation (E, A, H, VH, W)
    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "E",
            Difficulty::Average => "A",
            Difficulty::Hard => "H",
            Difficulty::VeryHard => "VH",
            Difficulty::Wildcard => "W",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = ProficiencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e" | "easy" => Ok(Difficulty::Easy),
            "a" | "average" => Ok(Difficulty::Average),
            "h" | "hard" => Ok(Difficulty::Hard),
            "vh" | "very_hard" | "veryhard" => Ok(Difficulty::VeryHard),
            "w" | "wildcard" => Ok(Difficulty::Wildcard),
            _ => Err(ProficiencyError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = ProficiencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.key().to_string()
    }
}
