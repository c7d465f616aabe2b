// 📷 OCR Seam - External image-to-text collaborator
//
// The core never runs recognition itself; an external service or library
// turns the photographed receipt into raw text. The exchange is strictly
// request/response: submit image bytes, await recognized text. No streaming,
// no partial results, no cancellation - a caller that needs a timeout wraps
// the call itself.

use crate::receipt::{ReceiptItem, ReceiptParser};
use anyhow::Result;

/// Image-to-text collaborator.
///
/// Which recognition engine, language or model backs an implementation is a
/// configuration concern of the surrounding application.
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in a receipt photo. The returned string is
    /// newline-delimited raw output, noise and all.
    fn recognize(&self, image: &[u8]) -> Result<String>;
}

/// Recognizer returning fixed text regardless of input, for tests and the
/// demo driver.
pub struct CannedRecognizer {
    text: String,
}

impl CannedRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        CannedRecognizer { text: text.into() }
    }
}

impl TextRecognizer for CannedRecognizer {
    fn recognize(&self, _image: &[u8]) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Recognize a receipt photo and extract candidate plate items from it.
/// Recognition failures propagate; an unreadable-but-recognized receipt
/// simply yields an empty list.
pub fn scan_receipt(
    recognizer: &dyn TextRecognizer,
    image: &[u8],
    parser: &ReceiptParser,
) -> Result<Vec<ReceiptItem>> {
    let text = recognizer.recognize(image)?;
    Ok(parser.parse(&text))
}
