use crate::model::CellValue;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Coerce a raw table cell into a CellValue.
///
/// A cell that looks purely numeric (ASCII digits with at most one
/// decimal point) becomes a number; anything else stays a trimmed
/// string. "$1,050.00" is NOT coerced here; currency stripping happens
/// later, in `parse_total`.
pub fn coerce_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if looks_numeric(trimmed) {
        if let Ok(n) = Decimal::from_str(trimmed) {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(trimmed.to_string())
}

fn looks_numeric(s: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Normalize an invoice total for comparison.
///
/// Numbers pass through as-is. Strings are stripped of every character
/// that is not a digit or decimal point (currency symbols, thousands
/// separators) and parsed, defaulting to zero on failure.
pub fn parse_total(value: &CellValue) -> Decimal {
    match value {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
        }
    }
}
