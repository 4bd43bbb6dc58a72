use crate::sheet::Cell;
use chrono::{NaiveDate, NaiveDateTime};

const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

fn parse_with(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    // Datetime stamps truncate to midnight.
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    None
}

/// Lenient date parse, year-first formats preferred. Unparseable input is
/// `None`; the row is dropped upstream rather than failing the run.
pub fn parse_date_cell(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Text(s) => parse_with(s.trim(), YEAR_FIRST_FORMATS),
        _ => None,
    }
}

/// Date parse for bank extracts, which use a day-first local format.
pub fn parse_date_cell_day_first(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Text(s) => parse_with(s.trim(), DAY_FIRST_FORMATS),
        _ => None,
    }
}
