use crate::bank::SourceTag;
use crate::error::Result;
use crate::matcher::MatchedRow;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

pub const MATCHED_DESC_PREFIX: &str = "PAGO INT - ";
pub const PENDING_DESC_PREFIX: &str = "PENDIENTE - ";
pub const DESCRIPTION_MAX_CHARS: usize = 50;

/// Operator-supplied run configuration: the document-number seed, the SIIGO
/// voucher constants, and the account-code mapping. Passed explicitly into
/// entry generation; never read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    pub initial_document_number: u32,
    pub voucher_type: String,
    pub voucher_code: String,
    pub cost_center: String,
    pub sub_cost_center: String,
    /// Internal ledger account per bank extract tag.
    pub bank_accounts: HashMap<String, String>,
    /// Suspense account debited when no bank row reconciles.
    pub pending_account: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        let bank_accounts = HashMap::from([
            ("9682".to_string(), "111005682".to_string()),
            ("9526".to_string(), "111005526".to_string()),
            ("0538".to_string(), "111005538".to_string()),
        ]);
        Self {
            initial_document_number: 1,
            voucher_type: "R".to_string(),
            voucher_code: "1".to_string(),
            cost_center: "1".to_string(),
            sub_cost_center: "2".to_string(),
            bank_accounts,
            pending_account: "130505999".to_string(),
        }
    }
}

impl ReconcileConfig {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn debit_account(&self, source: Option<SourceTag>) -> Option<&str> {
        source
            .filter(SourceTag::is_known)
            .and_then(|tag| self.bank_accounts.get(tag.code()))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntrySide {
    Credit,
    Debit,
}

impl EntrySide {
    /// Single-letter flag used by the import format.
    pub fn flag(&self) -> &'static str {
        match self {
            EntrySide::Credit => "C",
            EntrySide::Debit => "D",
        }
    }
}

/// One line of a journal voucher. Two lines are generated per reconciled
/// ledger row, sharing a document number and balancing each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub document_number: u32,
    pub account_code: String,
    pub side: EntrySide,
    pub amount: f64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 1 for the credit line, 2 for the debit line.
    pub sequence: u8,
    pub cost_center: String,
    pub sub_cost_center: String,
    pub tax_id: String,
    pub description: String,
    pub voided_flag: &'static str,
}

/// Trim a code and strip the trailing ".0" artifact left behind when a
/// numeric column was read as floating point.
pub fn clean_code(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(".0").unwrap_or(trimmed).to_string()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Generate the balanced credit/debit pair for every matched row, in join
/// order. Document numbers start at the configured seed and increase by one
/// per row with no gaps.
pub fn generate_entries(rows: &[MatchedRow], config: &ReconcileConfig) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(rows.len() * 2);
    let mut document_number = config.initial_document_number;

    for row in rows {
        let date = row.interest.date;
        let tax_id = clean_code(&row.interest.tax_id);
        let credit_account = clean_code(&row.interest.account_code);
        let base_description =
            truncate_chars(row.interest.description.trim(), DESCRIPTION_MAX_CHARS);

        let source = row.bank.as_ref().map(|b| b.source);
        let (debit_account, debit_description) = match config.debit_account(source) {
            Some(account) => (
                account.to_string(),
                format!("{}{}", MATCHED_DESC_PREFIX, base_description),
            ),
            None => (
                config.pending_account.clone(),
                format!("{}{}", PENDING_DESC_PREFIX, base_description),
            ),
        };

        let line = |account_code: String, side: EntrySide, sequence: u8, description: String| {
            JournalEntry {
                document_number,
                account_code,
                side,
                amount: row.interest.amount,
                year: date.year(),
                month: date.month(),
                day: date.day(),
                sequence,
                cost_center: config.cost_center.clone(),
                sub_cost_center: config.sub_cost_center.clone(),
                tax_id: tax_id.clone(),
                description,
                voided_flag: "N",
            }
        };

        entries.push(line(credit_account, EntrySide::Credit, 1, base_description.clone()));
        entries.push(line(debit_account, EntrySide::Debit, 2, debit_description));
        document_number += 1;
    }

    entries
}
