//! # siigo-recon
//!
//! Reconciles an interest-accrual ledger against one or more bank
//! transaction extracts and generates a SIIGO voucher import table plus an
//! exceptions report.
//!
//! ## Pipeline
//!
//! - **Parse**: the interest ledger sheet (header located dynamically) and
//!   each bank extract (tagged by source) are normalized to canonical rows
//! - **Match**: interest rows left-join bank rows on (date, amount,
//!   occurrence index), so duplicate same-day/same-amount rows pair up
//!   one-to-one in input order
//! - **Generate**: each row emits a balanced credit/debit voucher pair with
//!   a monotonically increasing document number; unmatched rows debit the
//!   suspense account
//!
//! ## Example
//!
//! ```rust,ignore
//! use siigo_recon::{reconcile, RawSheet, ReconcileConfig, SourceTag};
//!
//! let interest = RawSheet::from_csv_path("intereses.csv")?;
//! let bank = RawSheet::from_csv_path("extracto_9682.csv")?;
//! let config = ReconcileConfig::default();
//!
//! let output = reconcile(&interest, &[(bank, SourceTag::B9682)], &config)?;
//! println!("{} rows matched", output.summary.rows_matched);
//! ```

pub mod bank;
pub mod dates;
pub mod entries;
pub mod error;
pub mod export;
pub mod ledger;
pub mod matcher;
pub mod normalize;
pub mod report;
pub mod sheet;

pub use bank::{parse_bank_statement, parse_bank_statements, BankRecord, SourceTag};
pub use entries::{generate_entries, EntrySide, JournalEntry, ReconcileConfig};
pub use error::{ReconcileError, Result};
pub use export::{
    write_exceptions_file, write_exceptions_file_to_path, write_import_file,
    write_import_file_to_path, IMPORT_COLUMNS,
};
pub use ledger::{find_header_row, parse_interest_ledger, InterestRecord};
pub use matcher::{match_records, MatchedRow};
pub use normalize::normalize_amount;
pub use report::{unmatched_rows, ReconcileSummary};
pub use sheet::{Cell, RawSheet};

use log::{debug, info};

/// Everything one reconciliation run produces.
#[derive(Debug, Clone)]
pub struct ReconcileOutput {
    pub matched: Vec<MatchedRow>,
    pub entries: Vec<JournalEntry>,
    pub summary: ReconcileSummary,
}

impl ReconcileOutput {
    /// Interest rows for the exceptions report.
    pub fn unmatched(&self) -> Vec<&InterestRecord> {
        unmatched_rows(&self.matched)
    }
}

/// Run the full reconciliation pipeline over one interest ledger sheet and
/// one or more tagged bank extract sheets.
///
/// Fails atomically: any fatal condition (missing header, non-numeric
/// amount, empty input) returns an error before any output exists.
pub fn reconcile(
    interest_sheet: &RawSheet,
    bank_sheets: &[(RawSheet, SourceTag)],
    config: &ReconcileConfig,
) -> Result<ReconcileOutput> {
    if interest_sheet.is_empty() {
        return Err(ReconcileError::EmptyInput(
            "interest ledger sheet has no rows".to_string(),
        ));
    }
    if bank_sheets.is_empty() {
        return Err(ReconcileError::EmptyInput(
            "no bank extract sheets supplied".to_string(),
        ));
    }

    let interest = parse_interest_ledger(interest_sheet)?;
    info!("Loaded {} interest ledger rows", interest.len());

    let bank = parse_bank_statements(bank_sheets)?;
    info!(
        "Loaded {} bank rows from {} extracts",
        bank.len(),
        bank_sheets.len()
    );

    let matched = match_records(&interest, &bank);
    let summary = ReconcileSummary::from_rows(&matched);
    debug!(
        "Matched {} of {} rows, {} pending for {}",
        summary.rows_matched, summary.rows_loaded, summary.rows_unmatched, summary.total_pending
    );

    let entries = generate_entries(&matched, config);

    Ok(ReconcileOutput {
        matched,
        entries,
        summary,
    })
}
