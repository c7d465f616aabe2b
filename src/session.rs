// 🍽️ Split Session - Session-scoped registries and the interaction log
//
// Owns the plate-type and participant registries for one meal. The UI layer
// drives it with discrete operations (add/remove plate type, add/remove
// participant, set a plate count, import parsed receipt items, reset) and
// asks for a settlement between operations - never during one, so the
// registries need no locking.
//
// Input validation (empty names, overlong names, price bounds) is the
// calling layer's job; the operations here only assign ids and store state.

use crate::entities::{Participant, PlateType};
use crate::receipt::ReceiptItem;
use crate::settlement::{SettlementEngine, SettlementError, SettlementReport};
use serde::{Deserialize, Serialize};

/// In-memory state for one bill-splitting session. All of it is discarded
/// on `reset`; nothing survives the process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitSession {
    plate_types: Vec<PlateType>,
    participants: Vec<Participant>,
}

impl SplitSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plate_types(&self) -> &[PlateType] {
        &self.plate_types
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    // ========================================================================
    // PLATE TYPE OPERATIONS
    // ========================================================================

    /// Register a plate type and return its assigned id
    /// (`max(existing ids) + 1`, or 1 for an empty registry).
    pub fn add_plate_type(&mut self, name: impl Into<String>, unit_price: u32) -> u32 {
        let id = next_id(self.plate_types.iter().map(|p| p.id));
        self.plate_types.push(PlateType::new(id, name, unit_price));
        id
    }

    /// Remove a plate type by id. Participant counts referencing it are left
    /// in place; they read as stale references worth 0 from then on.
    pub fn remove_plate_type(&mut self, id: u32) -> bool {
        let before = self.plate_types.len();
        self.plate_types.retain(|p| p.id != id);
        self.plate_types.len() != before
    }

    /// Merge parsed receipt items into the plate-type registry, assigning
    /// fresh sequential ids. Returns how many items were added so the caller
    /// can report a count, or a "nothing found" message for 0.
    pub fn import_receipt_items(&mut self, items: &[ReceiptItem]) -> usize {
        for item in items {
            self.add_plate_type(item.name.clone(), item.price);
        }
        items.len()
    }

    // ========================================================================
    // PARTICIPANT OPERATIONS
    // ========================================================================

    /// Register a participant and return the assigned id. Plate counts start
    /// empty; every plate type reads as count 0 until set.
    pub fn add_participant(&mut self, name: impl Into<String>) -> u32 {
        let id = next_id(self.participants.iter().map(|p| p.id));
        self.participants.push(Participant::new(id, name));
        id
    }

    pub fn remove_participant(&mut self, id: u32) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.participants.len() != before
    }

    /// Set one participant's count for a plate type. Returns false when the
    /// participant id is unknown. The plate id is deliberately not checked:
    /// counts may reference plate types deleted later or never registered,
    /// and such entries are tolerated as zero-value everywhere.
    pub fn set_plate_count(&mut self, participant_id: u32, plate_id: u32, count: u32) -> bool {
        match self.participants.iter_mut().find(|p| p.id == participant_id) {
            Some(participant) => {
                participant.set_count(plate_id, count);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // SETTLEMENT & RESET
    // ========================================================================

    /// Settle the current state against the chosen payer.
    pub fn settle(&self, payer_name: &str) -> Result<SettlementReport, SettlementError> {
        SettlementEngine::new().settle(&self.plate_types, &self.participants, payer_name)
    }

    /// Discard all plate types and participants. Id sequences restart at 1.
    pub fn reset(&mut self) {
        self.plate_types.clear();
        self.participants.clear();
    }
}

/// Next id in a registry: `max + 1`, or 1 when empty.
fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().map_or(1, |max| max + 1)
}

// ============================================================================
// TESTS
// ============================================================================
