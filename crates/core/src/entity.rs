//! Human Being enumerations.
//!
//! Moods and weapon types are stored as TEXT in the database (constrained by
//! CHECK clauses in the schema) and travel over the wire as their
//! SCREAMING_SNAKE_CASE names. The validation engine uses `from_str` to
//! decide membership, so parsing is strict: only the canonical uppercase
//! spellings are recognized.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A Human Being's mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    Sadness,
    Apathy,
    Calm,
    Rage,
}

impl Mood {
    pub const ALL: [Self; 4] = [Self::Sadness, Self::Apathy, Self::Calm, Self::Rage];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sadness => "SADNESS",
            Self::Apathy => "APATHY",
            Self::Calm => "CALM",
            Self::Rage => "RAGE",
        }
    }
}

impl FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or(())
    }
}

/// A Human Being's weapon type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeaponType {
    Axe,
    Shotgun,
    MachineGun,
}

impl WeaponType {
    pub const ALL: [Self; 3] = [Self::Axe, Self::Shotgun, Self::MachineGun];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Axe => "AXE",
            Self::Shotgun => "SHOTGUN",
            Self::MachineGun => "MACHINE_GUN",
        }
    }
}

impl FromStr for WeaponType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or(())
    }
}
