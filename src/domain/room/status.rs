//! Slot connectivity vector.

use serde::{Deserialize, Serialize};

use crate::domain::slot::Slot;

/// Which slots currently have a registered live connection.
///
/// Derived on demand from a room's registry, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusVector {
    #[serde(rename = "Slot1")]
    pub slot1: bool,
    #[serde(rename = "Slot2")]
    pub slot2: bool,
}

impl StatusVector {
    pub fn is_connected(&self, slot: Slot) -> bool {
        match slot {
            Slot::Slot1 => self.slot1,
            Slot::Slot2 => self.slot2,
        }
    }

    pub fn set(&mut self, slot: Slot, connected: bool) {
        match slot {
            Slot::Slot1 => self.slot1 = connected,
            Slot::Slot2 => self.slot2 = connected,
        }
    }

    pub fn connected_count(&self) -> usize {
        Slot::ALL.iter().filter(|s| self.is_connected(**s)).count()
    }
}
