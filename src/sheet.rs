use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// A single spreadsheet cell. Upstream exports may deliver a value that is
/// already numeric or a locale-formatted string; downstream normalization
/// needs to tell these apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Trimmed, lower-cased text of the cell, for header probing.
    pub fn normalized_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.trim().to_lowercase(),
        }
    }

    /// Trimmed display text, preserving case.
    pub fn display_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(v) => {
                // Integral values render without the trailing ".0" that a
                // naive float format would produce.
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    format!("{}", *v as i64)
                } else {
                    v.to_string()
                }
            }
            Cell::Text(s) => s.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    fn from_raw(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        // Plain machine-formatted numbers load as numeric cells. Anything
        // with currency formatting, and anything shaped like a locale
        // thousands-grouped number (where "1.000" means one thousand),
        // stays text so the amount normalizer decides its value.
        if looks_thousands_grouped(trimmed) {
            return Cell::Text(trimmed.to_string());
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }
}

/// True for digit strings grouped with `.` in blocks of three ("1.000",
/// "-1.250.000"). `f64` parsing would read these as small decimals.
fn looks_thousands_grouped(field: &str) -> bool {
    let digits = field
        .strip_prefix('-')
        .or_else(|| field.strip_prefix('+'))
        .unwrap_or(field);

    let mut parts = digits.split('.');
    let head = match parts.next() {
        Some(head) => head,
        None => return false,
    };
    if head.is_empty() || head.len() > 3 || !head.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let mut grouped = false;
    for part in parts {
        if part.len() != 3 || !part.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        grouped = true;
    }
    grouped
}

/// A raw, headerless two-dimensional table as handed over by the upload
/// layer. Row 0 is simply the first physical row of the sheet; header
/// discovery is the parsers' concern.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load a sheet from CSV data with no header handling; every record
    /// becomes one row of cells.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_raw).collect());
        }
        Ok(Self { rows })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_cells_typed_on_load() {
        let data = "Fecha,Valor,Nota\n2024-01-05,1000.50,abono\n,,\n";
        let sheet = RawSheet::from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.row(0).unwrap()[0], Cell::Text("Fecha".to_string()));
        assert_eq!(sheet.row(1).unwrap()[1], Cell::Number(1000.50));
        assert_eq!(sheet.row(2).unwrap()[0], Cell::Empty);
    }

    #[test]
    fn test_normalized_text() {
        assert_eq!(Cell::Text("  FECHA ".to_string()).normalized_text(), "fecha");
        assert_eq!(Cell::Empty.normalized_text(), "");
    }

    #[test]
    fn test_display_text_drops_float_artifact() {
        assert_eq!(Cell::Number(900123456.0).display_text(), "900123456");
        assert_eq!(Cell::Number(12.5).display_text(), "12.5");
    }

    #[test]
    fn test_thousands_grouped_integer_stays_text() {
        let data = "1.000\n-1.250.000\n1000.50\n";
        let sheet = RawSheet::from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(sheet.row(0).unwrap()[0], Cell::Text("1.000".to_string()));
        assert_eq!(
            sheet.row(1).unwrap()[0],
            Cell::Text("-1.250.000".to_string())
        );
        // Machine-formatted decimals still load as numbers.
        assert_eq!(sheet.row(2).unwrap()[0], Cell::Number(1000.50));
    }

    #[test]
    fn test_currency_strings_stay_text() {
        let data = "\"$1.234,56\"\n";
        let sheet = RawSheet::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(
            sheet.row(0).unwrap()[0],
            Cell::Text("$1.234,56".to_string())
        );
    }
}
