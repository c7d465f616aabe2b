// ⚖️ Settlement Engine - Per-participant totals and payer reimbursement
//
// Formula per participant:
//   total = Σ (plate count × unit price) over that participant's counts
//
// Every non-payer participant with a nonzero total owes the payer exactly
// their own total. Costs are attributed per participant via counts, so no
// amount is ever divided or rounded.

use crate::entities::{Participant, PlateType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Placeholder shown when there is nothing to settle.
pub const NO_SETTLEMENT_TEXT: &str = "計算結果なし（全員0円または支払者が自分のみ）";

// ============================================================================
// SETTLEMENT RESULT
// ============================================================================

/// One participant's computed total, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantTotal {
    pub name: String,
    pub amount: u64,
}

/// A directed reimbursement: `from` (always the payer) covered `amount` yen
/// of `to`'s share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementResult {
    /// At least one participant owes the payer
    Settled { transfers: Vec<Transfer> },

    /// Every computed amount was zero, or the payer is the only participant
    /// with a nonzero total. Distinct from an empty transfer list so the
    /// caller can render a specific "nothing to settle" message.
    NothingToSettle,
}

impl SettlementResult {
    pub fn is_settled(&self) -> bool {
        matches!(self, SettlementResult::Settled { .. })
    }

    pub fn transfers(&self) -> &[Transfer] {
        match self {
            SettlementResult::Settled { transfers } => transfers,
            SettlementResult::NothingToSettle => &[],
        }
    }
}

// ============================================================================
// SETTLEMENT REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    pub payer: String,
    /// Totals for every participant (payer included), registration order.
    pub per_participant: Vec<ParticipantTotal>,
    pub result: SettlementResult,
    pub settled_at: DateTime<Utc>,
}

impl SettlementReport {
    pub fn is_settled(&self) -> bool {
        self.result.is_settled()
    }

    /// Human-readable transfer text, one line per transfer, or the fixed
    /// placeholder when there is nothing to settle.
    pub fn transfer_text(&self) -> String {
        match &self.result {
            SettlementResult::Settled { transfers } => transfers
                .iter()
                .map(|t| format!("{}が{}の分{}円支払い", t.from, t.to, t.amount))
                .collect::<Vec<_>>()
                .join("\n"),
            SettlementResult::NothingToSettle => NO_SETTLEMENT_TEXT.to_string(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Settlement for payer {}: {} participants, {} transfers",
            self.payer,
            self.per_participant.len(),
            self.result.transfers().len()
        )
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// The chosen payer is not in the participant roster. Normal UI flow
    /// only offers registered names, so this is a defensive condition.
    #[error("支払者 \"{0}\" は参加者に登録されていません")]
    InvalidPayer(String),
}

// ============================================================================
// SETTLEMENT ENGINE
// ============================================================================

pub struct SettlementEngine;

impl SettlementEngine {
    pub fn new() -> Self {
        SettlementEngine
    }

    /// Compute per-participant totals and reimbursement transfers toward the
    /// payer.
    ///
    /// Plate ids in a participant's counts are resolved against
    /// `plate_types` by id equality; ids that no longer resolve (the plate
    /// type was deleted) contribute 0 rather than failing.
    ///
    /// # Example
    /// ```
    /// use warikan::{Participant, PlateType, SettlementEngine};
    ///
    /// let plates = vec![PlateType::new(1, "赤皿", 100)];
    /// let mut taro = Participant::new(1, "太郎");
    /// taro.set_count(1, 2);
    /// let mut hanako = Participant::new(2, "花子");
    /// hanako.set_count(1, 1);
    ///
    /// let engine = SettlementEngine::new();
    /// let report = engine.settle(&plates, &[taro, hanako], "太郎").unwrap();
    ///
    /// assert_eq!(report.per_participant[0].amount, 200);
    /// assert_eq!(report.result.transfers()[0].amount, 100);
    /// ```
    pub fn settle(
        &self,
        plate_types: &[PlateType],
        participants: &[Participant],
        payer_name: &str,
    ) -> Result<SettlementReport, SettlementError> {
        if !participants.iter().any(|p| p.name == payer_name) {
            return Err(SettlementError::InvalidPayer(payer_name.to_string()));
        }

        let mut per_participant = Vec::with_capacity(participants.len());
        let mut transfers = Vec::new();

        for participant in participants {
            let total = participant_total(participant, plate_types);

            per_participant.push(ParticipantTotal {
                name: participant.name.clone(),
                amount: total,
            });

            // The payer owes nothing to themselves; zero totals carry no
            // transfer.
            if participant.name != payer_name && total > 0 {
                transfers.push(Transfer {
                    from: payer_name.to_string(),
                    to: participant.name.clone(),
                    amount: total,
                });
            }
        }

        let result = if transfers.is_empty() {
            SettlementResult::NothingToSettle
        } else {
            SettlementResult::Settled { transfers }
        };

        debug!(
            payer = %payer_name,
            participants = per_participant.len(),
            transfers = result.transfers().len(),
            "settlement computed"
        );

        Ok(SettlementReport {
            payer: payer_name.to_string(),
            per_participant,
            result,
            settled_at: Utc::now(),
        })
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Σ count × unit price over the participant's counts, matching plate ids
/// against the current registry. Stale ids resolve to nothing and add 0.
fn participant_total(participant: &Participant, plate_types: &[PlateType]) -> u64 {
    participant
        .plate_counts
        .iter()
        .filter_map(|(plate_id, count)| {
            plate_types
                .iter()
                .find(|pt| pt.id == *plate_id)
                .map(|pt| u64::from(*count) * u64::from(pt.unit_price))
        })
        .sum()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn red_plate() -> PlateType {
        PlateType::new(1, "赤皿", 100)
    }

    fn participant_with_counts(id: u32, name: &str, counts: &[(u32, u32)]) -> Participant {
        let mut p = Participant::new(id, name);
        for (plate_id, count) in counts {
            p.set_count(*plate_id, *count);
        }
        p
    }

    #[test]
    fn test_basic_settlement() {
        let plates = vec![red_plate()];
        let participants = vec![
            participant_with_counts(1, "太郎", &[(1, 2)]),
            participant_with_counts(2, "花子", &[(1, 1)]),
        ];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "太郎")
            .unwrap();

        assert_eq!(
            report.per_participant,
            vec![
                ParticipantTotal {
                    name: "太郎".to_string(),
                    amount: 200
                },
                ParticipantTotal {
                    name: "花子".to_string(),
                    amount: 100
                },
            ]
        );
        assert_eq!(
            report.result.transfers(),
            &[Transfer {
                from: "太郎".to_string(),
                to: "花子".to_string(),
                amount: 100
            }]
        );
    }

    #[test]
    fn test_totals_keep_registration_order() {
        let plates = vec![red_plate()];
        let participants = vec![
            participant_with_counts(1, "次郎", &[(1, 1)]),
            participant_with_counts(2, "一郎", &[(1, 3)]),
        ];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "一郎")
            .unwrap();

        // Registration order, not sorted by amount or name
        assert_eq!(report.per_participant[0].name, "次郎");
        assert_eq!(report.per_participant[1].name, "一郎");
    }

    #[test]
    fn test_all_zero_counts_is_nothing_to_settle() {
        let plates = vec![red_plate()];
        let participants = vec![Participant::new(1, "太郎"), Participant::new(2, "花子")];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "花子")
            .unwrap();

        assert_eq!(report.result, SettlementResult::NothingToSettle);
        assert!(!report.is_settled());
        assert_eq!(report.transfer_text(), NO_SETTLEMENT_TEXT);
        // Totals are still reported for the table
        assert_eq!(report.per_participant.len(), 2);
    }

    #[test]
    fn test_sole_participant_payer_is_nothing_to_settle() {
        let plates = vec![red_plate()];
        let participants = vec![participant_with_counts(1, "太郎", &[(1, 5)])];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "太郎")
            .unwrap();

        assert_eq!(report.per_participant[0].amount, 500);
        assert_eq!(report.result, SettlementResult::NothingToSettle);
    }

    #[test]
    fn test_unknown_payer_is_rejected() {
        let plates = vec![red_plate()];
        let participants = vec![Participant::new(1, "太郎")];

        let err = SettlementEngine::new()
            .settle(&plates, &participants, "三郎")
            .unwrap_err();

        assert_eq!(err, SettlementError::InvalidPayer("三郎".to_string()));
    }

    #[test]
    fn test_stale_plate_reference_contributes_zero() {
        // Count references plate id 9 which is not in the registry
        let plates = vec![red_plate()];
        let participants = vec![
            participant_with_counts(1, "太郎", &[(1, 1)]),
            participant_with_counts(2, "花子", &[(1, 2), (9, 4)]),
        ];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "太郎")
            .unwrap();

        assert_eq!(report.per_participant[1].amount, 200);
    }

    #[test]
    fn test_zero_total_transfer_suppressed() {
        let plates = vec![red_plate()];
        let participants = vec![
            participant_with_counts(1, "太郎", &[(1, 1)]),
            Participant::new(2, "花子"),
            participant_with_counts(3, "次郎", &[(1, 2)]),
        ];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "太郎")
            .unwrap();

        let transfers = report.result.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].to, "次郎");
        assert_eq!(transfers[0].amount, 200);
    }

    #[test]
    fn test_transfer_text_format() {
        let plates = vec![red_plate()];
        let participants = vec![
            participant_with_counts(1, "太郎", &[(1, 2)]),
            participant_with_counts(2, "花子", &[(1, 1)]),
            participant_with_counts(3, "次郎", &[(1, 3)]),
        ];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "太郎")
            .unwrap();

        assert_eq!(
            report.transfer_text(),
            "太郎が花子の分100円支払い\n太郎が次郎の分300円支払い"
        );
    }

    #[test]
    fn test_multiple_plate_types_summed() {
        let plates = vec![
            PlateType::new(1, "赤皿", 100),
            PlateType::new(2, "金皿", 500),
        ];
        let participants = vec![
            Participant::new(1, "太郎"),
            participant_with_counts(2, "花子", &[(1, 3), (2, 2)]),
        ];

        let report = SettlementEngine::new()
            .settle(&plates, &participants, "太郎")
            .unwrap();

        assert_eq!(report.per_participant[1].amount, 1300);
    }
}
