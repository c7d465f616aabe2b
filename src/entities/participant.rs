// 👤 Participant Entity - A person whose plate counts and settlement share are tracked

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered participant with per-plate-type consumption counts.
///
/// `plate_counts` maps a plate-type id to the number of plates taken. The map
/// starts empty and is filled lazily: a plate type added after this
/// participant was registered simply has no entry, and a missing entry reads
/// as count 0. Entries may also point at plate types that have since been
/// deleted; such stale references are tolerated and contribute nothing to a
/// settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: u32,
    pub name: String,
    pub plate_counts: HashMap<u32, u32>,
}

impl Participant {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Participant {
            id,
            name: name.into(),
            plate_counts: HashMap::new(),
        }
    }

    /// Count for a plate type, defaulting to 0 for missing entries.
    pub fn count_for(&self, plate_id: u32) -> u32 {
        self.plate_counts.get(&plate_id).copied().unwrap_or(0)
    }

    /// Set the count for a plate type, inserting the entry if absent.
    /// The plate id is not validated against any registry here.
    pub fn set_count(&mut self, plate_id: u32, count: u32) {
        self.plate_counts.insert(plate_id, count);
    }
}
