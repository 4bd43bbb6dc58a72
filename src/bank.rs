use crate::dates::parse_date_cell_day_first;
use crate::error::Result;
use crate::normalize::normalize_amount;
use crate::sheet::{Cell, RawSheet};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which bank extract a row originated from. The three known tags are the
/// last digits of the bank account numbers used in the extract filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    B9682,
    B9526,
    B0538,
    Unknown,
}

impl SourceTag {
    pub const KNOWN: [SourceTag; 3] = [SourceTag::B9682, SourceTag::B9526, SourceTag::B0538];

    /// Tag derived from an extract filename by substring.
    pub fn from_file_name(name: &str) -> Self {
        if name.contains("9682") {
            SourceTag::B9682
        } else if name.contains("9526") {
            SourceTag::B9526
        } else if name.contains("0538") {
            SourceTag::B0538
        } else {
            SourceTag::Unknown
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SourceTag::B9682 => "9682",
            SourceTag::B9526 => "9526",
            SourceTag::B0538 => "0538",
            SourceTag::Unknown => "DESC",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SourceTag::Unknown)
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One canonical row of a bank transaction extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub source: SourceTag,
}

/// Parse one bank extract. The header is always on row 0; columns are
/// located by substring on the lower-cased header text. Rows missing a
/// date or amount are dropped.
pub fn parse_bank_statement(sheet: &RawSheet, source: SourceTag) -> Result<Vec<BankRecord>> {
    let header = match sheet.row(0) {
        Some(header) => header,
        None => return Ok(Vec::new()),
    };

    let find = |needle: &str| {
        header
            .iter()
            .position(|cell| cell.normalized_text().contains(needle))
    };
    let date_col = find("fecha de sistema");
    let amount_col = find("valor total");
    let desc_col = find("motivo");

    let get = |row: &[Cell], col: Option<usize>| -> Cell {
        col.and_then(|i| row.get(i).cloned()).unwrap_or(Cell::Empty)
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in sheet.rows().iter().skip(1) {
        let date = parse_date_cell_day_first(&get(row, date_col));
        let amount = normalize_amount(&get(row, amount_col))?;

        match (date, amount) {
            (Some(date), Some(amount)) => records.push(BankRecord {
                date,
                amount,
                description: get(row, desc_col).display_text(),
                source,
            }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(
            "Dropped {} rows with missing date or amount from bank extract {}",
            dropped, source
        );
    }

    Ok(records)
}

/// Parse and concatenate several bank extracts, preserving input order and
/// carrying each sheet's tag on its rows.
pub fn parse_bank_statements(sheets: &[(RawSheet, SourceTag)]) -> Result<Vec<BankRecord>> {
    let mut all = Vec::new();
    for (sheet, source) in sheets {
        all.extend(parse_bank_statement(sheet, *source)?);
    }
    Ok(all)
}
