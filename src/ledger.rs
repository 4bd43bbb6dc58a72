use crate::dates::parse_date_cell;
use crate::error::{ReconcileError, Result};
use crate::normalize::normalize_amount;
use crate::sheet::{Cell, RawSheet};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// How many leading rows of the sheet are probed for the header.
pub const HEADER_SCAN_WINDOW: usize = 50;

/// One canonical row of the interest-accrual ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRecord {
    pub date: NaiveDate,
    pub tax_id: String,
    pub account_code: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedgerColumn {
    Date,
    TaxId,
    AccountCode,
    Description,
    Amount,
}

fn classify_header(cell_text: &str) -> Option<LedgerColumn> {
    if cell_text.starts_with("fecha") {
        Some(LedgerColumn::Date)
    } else if cell_text == "nit" {
        Some(LedgerColumn::TaxId)
    } else if cell_text.contains("cuenta") {
        Some(LedgerColumn::AccountCode)
    } else if cell_text.contains("descrip") {
        Some(LedgerColumn::Description)
    } else if ["crédito", "creditos", "credito"]
        .iter()
        .any(|v| cell_text.contains(v))
    {
        Some(LedgerColumn::Amount)
    } else {
        None
    }
}

/// Find the real header row of an interest ledger export.
///
/// Accounting exports carry titles and blank rows above the table, so the
/// header is located by scanning the first [`HEADER_SCAN_WINDOW`] rows for
/// the first one whose cells include "fecha", "nit" and "cuenta" (case
/// insensitive, any column order).
pub fn find_header_row(sheet: &RawSheet) -> Option<usize> {
    for (index, row) in sheet.rows().iter().take(HEADER_SCAN_WINDOW).enumerate() {
        let cells: Vec<String> = row.iter().map(Cell::normalized_text).collect();
        let has = |needle: &str| cells.iter().any(|c| c == needle);
        if has("fecha") && has("nit") && has("cuenta") {
            return Some(index);
        }
    }
    None
}

/// Parse a raw interest ledger sheet into canonical records.
///
/// Rows whose date or amount cannot be resolved are dropped; a text amount
/// that is not a number at all aborts the run via [`ReconcileError::ParseAmount`].
pub fn parse_interest_ledger(sheet: &RawSheet) -> Result<Vec<InterestRecord>> {
    let header_row =
        find_header_row(sheet).ok_or(ReconcileError::MissingHeader(HEADER_SCAN_WINDOW))?;

    let header = sheet.row(header_row).unwrap_or_default();
    let mut columns: Vec<(usize, LedgerColumn)> = Vec::new();
    for (index, cell) in header.iter().enumerate() {
        if let Some(column) = classify_header(&cell.normalized_text()) {
            // First matching header wins when a spelling variant repeats.
            if !columns.iter().any(|(_, c)| *c == column) {
                columns.push((index, column));
            }
        }
    }

    let column_index =
        |wanted: LedgerColumn| columns.iter().find(|(_, c)| *c == wanted).map(|(i, _)| *i);

    let date_col = column_index(LedgerColumn::Date);
    let tax_col = column_index(LedgerColumn::TaxId);
    let account_col = column_index(LedgerColumn::AccountCode);
    let desc_col = column_index(LedgerColumn::Description);
    let amount_col = column_index(LedgerColumn::Amount);

    let get = |row: &[Cell], col: Option<usize>| -> Cell {
        col.and_then(|i| row.get(i).cloned()).unwrap_or(Cell::Empty)
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in sheet.rows().iter().skip(header_row + 1) {
        let date = parse_date_cell(&get(row, date_col));
        let amount = normalize_amount(&get(row, amount_col))?;

        match (date, amount) {
            (Some(date), Some(amount)) => records.push(InterestRecord {
                date,
                tax_id: get(row, tax_col).display_text(),
                account_code: get(row, account_col).display_text(),
                description: get(row, desc_col).display_text(),
                amount,
            }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(
            "Dropped {} interest ledger rows with missing date or amount",
            dropped
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample_sheet() -> RawSheet {
        RawSheet::new(vec![
            vec![text("LISTADO DE INTERESES"), Cell::Empty],
            vec![Cell::Empty, Cell::Empty],
            vec![
                text("Fecha"),
                text("NIT"),
                text("Cuenta"),
                text("Descripción"),
                text("Créditos"),
            ],
            vec![
                text("2024-01-05"),
                text("900123456"),
                text("13050501"),
                text("INTERES ENERO LOCAL 101"),
                text("$1.000,00"),
            ],
            vec![
                text("sin fecha"),
                text("900123457"),
                text("13050502"),
                text("FILA INVALIDA"),
                text("$500,00"),
            ],
            vec![
                text("2024-01-06"),
                text("900123458"),
                text("13050503"),
                text("INTERES ENERO LOCAL 102"),
                Cell::Empty,
            ],
        ])
    }

    #[test]
    fn test_header_found_past_title_rows() {
        assert_eq!(find_header_row(&sample_sheet()), Some(2));
    }

    #[test]
    fn test_header_on_deep_row() {
        let mut rows = vec![vec![text("titulo")]; 7];
        rows.push(vec![text("fecha"), text("nit"), text("cuenta")]);
        rows.push(vec![text("2024-02-01"), text("1"), text("2")]);
        let sheet = RawSheet::new(rows);
        assert_eq!(find_header_row(&sheet), Some(7));
    }

    #[test]
    fn test_header_beyond_window_not_found() {
        let mut rows = vec![vec![text("relleno")]; HEADER_SCAN_WINDOW];
        rows.push(vec![text("fecha"), text("nit"), text("cuenta")]);
        let sheet = RawSheet::new(rows);
        assert_eq!(find_header_row(&sheet), None);
    }

    #[test]
    fn test_parse_drops_invalid_rows() {
        let records = parse_interest_ledger(&sample_sheet()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(records[0].tax_id, "900123456");
        assert_eq!(records[0].account_code, "13050501");
        assert_eq!(records[0].amount, 1000.0);
    }

    #[test]
    fn test_missing_header_is_error() {
        let sheet = RawSheet::new(vec![vec![text("nada"), text("aqui")]]);
        let result = parse_interest_ledger(&sheet);
        assert!(matches!(result, Err(ReconcileError::MissingHeader(_))));
    }

    #[test]
    fn test_non_numeric_amount_is_fatal() {
        let sheet = RawSheet::new(vec![
            vec![text("fecha"), text("nit"), text("cuenta"), text("créditos")],
            vec![text("2024-01-05"), text("1"), text("2"), text("no aplica")],
        ]);
        assert!(matches!(
            parse_interest_ledger(&sheet),
            Err(ReconcileError::ParseAmount(_))
        ));
    }

    #[test]
    fn test_column_mapping_is_order_independent() {
        let sheet = RawSheet::new(vec![
            vec![
                text("Créditos"),
                text("Descripción"),
                text("Cuenta"),
                text("NIT"),
                text("Fecha"),
            ],
            vec![
                text("$250,50"),
                text("INTERES"),
                text("13050501"),
                text("800100200"),
                text("2024-03-10"),
            ],
        ]);
        let records = parse_interest_ledger(&sheet).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 250.5);
        assert_eq!(records[0].account_code, "13050501");
    }
}
