//! Participant attribute enumerations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of participant genders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {s}")),
        }
    }
}

impl Gender {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Type-safe enumeration of participant personality types.
///
/// Only the extrovert/introvert axis is tracked; it feeds the
/// personality balance score of a grouping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    #[default]
    Extrovert,
    Introvert,
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extrovert" | "e" => Ok(Personality::Extrovert),
            "introvert" | "i" => Ok(Personality::Introvert),
            _ => Err(format!("Invalid personality: {s}")),
        }
    }
}

impl Personality {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Extrovert => "extrovert",
            Personality::Introvert => "introvert",
        }
    }
}
