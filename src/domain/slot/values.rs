//! The two fixed slot identities and the two fixed bet sides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of exactly two fixed positions a worker connection may occupy.
///
/// Declaration order is the assignment priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    #[serde(alias = "PC1")]
    Slot1,
    #[serde(alias = "PC2")]
    Slot2,
}

impl Slot {
    /// Every slot, in assignment priority order.
    pub const ALL: [Slot; 2] = [Slot::Slot1, Slot::Slot2];

    /// The one other member of the fixed two-element set.
    pub fn opposite(self) -> Slot {
        match self {
            Slot::Slot1 => Slot::Slot2,
            Slot::Slot2 => Slot::Slot1,
        }
    }

    /// Dense index for array-backed per-slot storage.
    pub fn index(self) -> usize {
        match self {
            Slot::Slot1 => 0,
            Slot::Slot2 => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Slot1 => "Slot1",
            Slot::Slot2 => "Slot2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Slot1" | "PC1" => Ok(Slot::Slot1),
            "Slot2" | "PC2" => Ok(Slot::Slot2),
            other => Err(ValidationError::invalid_format(
                "slot",
                format!("expected Slot1 or Slot2, got '{}'", other),
            )),
        }
    }
}

/// Which outcome a bet backs. Exactly two legal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Banker,
}

impl Side {
    /// The one other member of the fixed two-element set.
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Banker,
            Side::Banker => Side::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Banker => "Banker",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Player" => Ok(Side::Player),
            "Banker" => Ok(Side::Banker),
            other => Err(ValidationError::invalid_format(
                "side",
                format!("expected Player or Banker, got '{}'", other),
            )),
        }
    }
}
