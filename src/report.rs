use crate::ledger::InterestRecord;
use crate::matcher::MatchedRow;
use serde::{Deserialize, Serialize};

/// Run totals: everything loaded, the reconciled portion, and the portion
/// left on the suspense account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub rows_loaded: usize,
    pub rows_matched: usize,
    pub rows_unmatched: usize,
    pub total_loaded: f64,
    pub total_matched: f64,
    pub total_pending: f64,
}

impl ReconcileSummary {
    pub fn from_rows(rows: &[MatchedRow]) -> Self {
        let mut summary = ReconcileSummary {
            rows_loaded: rows.len(),
            rows_matched: 0,
            rows_unmatched: 0,
            total_loaded: 0.0,
            total_matched: 0.0,
            total_pending: 0.0,
        };

        for row in rows {
            summary.total_loaded += row.interest.amount;
            if row.is_matched() {
                summary.rows_matched += 1;
                summary.total_matched += row.interest.amount;
            } else {
                summary.rows_unmatched += 1;
                summary.total_pending += row.interest.amount;
            }
        }

        summary
    }
}

/// Interest rows with no reconciled bank row, for the exceptions report.
pub fn unmatched_rows(rows: &[MatchedRow]) -> Vec<&InterestRecord> {
    rows.iter()
        .filter(|row| !row.is_matched())
        .map(|row| &row.interest)
        .collect()
}
