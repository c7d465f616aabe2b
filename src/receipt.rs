// 🧾 Receipt Parser - Extract plate items from raw OCR text
// Heuristic line classifier: name/price split, noise filtering, numeric
// normalization, per-batch deduplication
//
// OCR output from photographed receipts is noisy: inconsistent spacing,
// mixed full/half-width digits, header and footer lines that look like
// items. The heuristic trades recall for precision - any line that does not
// cleanly split into a name and a bounded price is silently dropped. False
// negatives are acceptable; false positives are actively filtered.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

// ============================================================================
// NOISE FILTERING
// ============================================================================

/// Keywords that mark a line as receipt plumbing rather than a plate item:
/// totals, change, points, phone numbers, store names, payment and tax lines.
const NOISE_KEYWORDS: [&str; 13] = [
    "合計",
    "小計",
    "釣",
    "ポイント",
    "TEL",
    "No.",
    "店",
    "クレジット",
    "現計",
    "お預り",
    "対象",
    "内税",
    "外税",
];

/// Punctuation stripped from candidate names after classification.
const STRAY_PUNCT: [char; 7] = ['\\', '¥', ',', '.', ':', ';', '!'];

/// Fullwidth digit block (０-９) sits at a fixed offset from ASCII 0-9.
const FULLWIDTH_DIGIT_OFFSET: u32 = 0xFEE0;

// ============================================================================
// RECEIPT ITEM
// ============================================================================

/// A candidate plate item recognized on a receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    /// Price in whole yen, 1..=50_000.
    pub price: u32,
}

// ============================================================================
// RECEIPT PARSER
// ============================================================================

pub struct ReceiptParser {
    /// Anchored line pattern: name, whitespace, 1-6 digits, optional
    /// trailing currency marker (円, ¥ or a backslash from misread ¥).
    line_re: Regex,

    /// Upper sanity bound for a single line item (default: 50_000 yen)
    pub max_item_price: u32,

    /// Minimum candidate name length in code points (default: 2)
    pub min_name_chars: usize,

    /// Maximum emitted name length in code points (default: 20)
    pub max_name_chars: usize,
}

impl ReceiptParser {
    /// Create a parser with default bounds
    pub fn new() -> Self {
        ReceiptParser {
            line_re: Regex::new(r"^(.+?)\s+([0-9]{1,6})[円¥\\]?$")
                .expect("receipt line pattern is valid"),
            max_item_price: 50_000,
            min_name_chars: 2,
            max_name_chars: 20,
        }
    }

    /// Parse raw OCR text into candidate plate items.
    ///
    /// Lines are processed independently in order; anything that does not
    /// classify as a name/price pair is dropped without error. Duplicate
    /// (name, price) pairs within one call collapse to the first occurrence.
    /// Zero matches yield an empty Vec - absence is a normal outcome for the
    /// caller to report, not a failure.
    ///
    /// The parser is a pure function of its input: no state is kept between
    /// calls and repeated calls on the same text agree.
    pub fn parse(&self, raw_text: &str) -> Vec<ReceiptItem> {
        let mut items = Vec::new();
        let mut seen: HashSet<(String, u32)> = HashSet::new();

        for line in raw_text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let line = normalize_fullwidth_digits(line);

            let Some(caps) = self.line_re.captures(&line) else {
                continue;
            };

            let name = caps[1].trim().to_string();

            // Receipt plumbing (totals, change, phone numbers, ...) also
            // matches the name/price shape; filter by keyword.
            if contains_noise_keyword(&name) {
                continue;
            }

            // 1-6 digits always fit in u32
            let price: u32 = caps[2].parse().unwrap_or(0);
            if price == 0 || price > self.max_item_price {
                continue;
            }

            if name.chars().count() < self.min_name_chars {
                continue;
            }

            let name = clean_name(&name, self.max_name_chars);
            if name.is_empty() || contains_noise_keyword(&name) {
                continue;
            }

            if seen.insert((name.clone(), price)) {
                items.push(ReceiptItem { name, price });
            }
        }

        debug!(items = items.len(), "receipt text parsed");
        items
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LINE NORMALIZATION HELPERS
// ============================================================================

/// Map fullwidth digits (０-９) to their ASCII equivalents; every other
/// character passes through untouched.
fn normalize_fullwidth_digits(line: &str) -> String {
    line.chars()
        .map(|c| {
            if ('０'..='９').contains(&c) {
                char::from_u32(c as u32 - FULLWIDTH_DIGIT_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn contains_noise_keyword(name: &str) -> bool {
    NOISE_KEYWORDS.iter().any(|kw| name.contains(kw))
}

/// Strip stray punctuation, re-trim, truncate to the name length cap.
fn clean_name(name: &str, max_chars: usize) -> String {
    let stripped: String = name.chars().filter(|c| !STRAY_PUNCT.contains(c)).collect();
    stripped.trim().chars().take(max_chars).collect()
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Every emitted item satisfies the output bounds, whatever the input.
        #[test]
        fn emitted_items_respect_bounds(text in any::<String>()) {
            let parser = ReceiptParser::new();
            for item in parser.parse(&text) {
                let name_len = item.name.chars().count();
                prop_assert!(name_len >= 1 && name_len <= 20);
                prop_assert!(item.price >= 1 && item.price <= 50_000);
                prop_assert!(!contains_noise_keyword(&item.name));
            }
        }

        #[test]
        fn parse_is_pure(text in any::<String>()) {
            let parser = ReceiptParser::new();
            prop_assert_eq!(parser.parse(&text), parser.parse(&text));
        }
    }
}
