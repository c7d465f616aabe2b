// Warikan - Plate-based Bill Splitting Core
// Exposes all modules for use in the driver binary and tests

pub mod entities;
pub mod ocr;
pub mod receipt;
pub mod session;
pub mod settlement;

// Re-export commonly used types
pub use entities::{Participant, PlateType};
pub use ocr::{scan_receipt, CannedRecognizer, TextRecognizer};
pub use receipt::{ReceiptItem, ReceiptParser};
pub use session::SplitSession;
pub use settlement::{
    ParticipantTotal, SettlementEngine, SettlementError, SettlementReport, SettlementResult,
    Transfer, NO_SETTLEMENT_TEXT,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
