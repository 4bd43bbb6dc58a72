use crate::error::{ReconcileError, Result};
use crate::sheet::Cell;

/// Coerce a cell that should hold a currency amount into a number.
///
/// Already-numeric cells pass through unchanged. Text cells are cleaned of
/// the local currency format: `$` symbol, `.` thousands separators and a
/// `,` decimal separator. Empty cells become `None` so the caller can drop
/// the row; text that is still not numeric after cleaning is a fatal parse
/// error for the whole run.
pub fn normalize_amount(cell: &Cell) -> Result<Option<f64>> {
    match cell {
        Cell::Number(v) => Ok(Some(*v)),
        Cell::Empty => Ok(None),
        Cell::Text(raw) => {
            let cleaned = raw
                .trim()
                .replace('$', "")
                .replace('.', "")
                .replace(',', ".");
            let cleaned = cleaned.trim();

            if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
                return Ok(None);
            }

            cleaned
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ReconcileError::ParseAmount(raw.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_passthrough() {
        assert_eq!(normalize_amount(&Cell::Number(1500.25)).unwrap(), Some(1500.25));
    }

    #[test]
    fn test_locale_currency_string() {
        let cell = Cell::Text("$1.234,56".to_string());
        assert_eq!(normalize_amount(&cell).unwrap(), Some(1234.56));
    }

    #[test]
    fn test_thousands_only() {
        let cell = Cell::Text("1.250.000".to_string());
        assert_eq!(normalize_amount(&cell).unwrap(), Some(1_250_000.0));
    }

    #[test]
    fn test_negative_amount() {
        let cell = Cell::Text("-$2.500,00".to_string());
        assert_eq!(normalize_amount(&cell).unwrap(), Some(-2500.0));
    }

    #[test]
    fn test_empty_becomes_none() {
        assert_eq!(normalize_amount(&Cell::Empty).unwrap(), None);
        assert_eq!(normalize_amount(&Cell::Text("   ".to_string())).unwrap(), None);
        assert_eq!(normalize_amount(&Cell::Text("nan".to_string())).unwrap(), None);
    }

    #[test]
    fn test_garbage_is_fatal() {
        let result = normalize_amount(&Cell::Text("N/A".to_string()));
        assert!(matches!(result, Err(ReconcileError::ParseAmount(_))));
    }

}
