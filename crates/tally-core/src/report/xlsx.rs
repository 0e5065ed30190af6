use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::error::TallyError;
use crate::reconcile::outcome::{Deviation, DiscrepancyRecord, ReferenceMatch, NOT_FOUND};
use crate::reconcile::TOLERANCE;

/// Whether an artifact was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Written { rows: usize },
    /// Nothing to report; no file was created.
    Empty,
}

const SHEET_NAME: &str = "Discrepancies Report";

const HEADERS: [&str; 5] = [
    "Item",
    "Invoice Total",
    "Reference Total",
    "Difference",
    "Deviation (%)",
];

const HEADER_FILL: Color = Color::RGB(0xFFD700);
const OVERCHARGE_FILL: Color = Color::RGB(0xFF9999);
const UNDERCHARGE_FILL: Color = Color::RGB(0x99FF99);

const MONEY_FORMAT: &str = "#,##0.00";
const PERCENT_FORMAT: &str = "0.00\"%\"";

/// Write the discrepancy report as a styled xlsx workbook.
///
/// An empty record set produces no file at all, signaled as
/// `ReportOutcome::Empty`.
pub fn write_report(
    records: &[DiscrepancyRecord],
    path: &Path,
) -> Result<ReportOutcome, TallyError> {
    if records.is_empty() {
        return Ok(ReportOutcome::Empty);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold().set_background_color(HEADER_FILL);
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let percent = Format::new().set_num_format(PERCENT_FORMAT);
    let overcharge = Format::new()
        .set_num_format(MONEY_FORMAT)
        .set_background_color(OVERCHARGE_FILL);
    let undercharge = Format::new()
        .set_num_format(MONEY_FORMAT)
        .set_background_color(UNDERCHARGE_FILL);

    for (col, title) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.item)?;
        worksheet.write_number_with_format(row, 1, to_cell(record.invoice_total), &money)?;

        match &record.outcome {
            ReferenceMatch::Matched {
                reference_total,
                difference,
                deviation,
            } => {
                worksheet.write_number_with_format(row, 2, to_cell(*reference_total), &money)?;

                // Highlight differences beyond tolerance: red when the
                // invoice overcharges, green when it undercharges.
                let difference_format = if difference.abs() <= TOLERANCE {
                    &money
                } else if difference.is_sign_positive() {
                    &overcharge
                } else {
                    &undercharge
                };
                worksheet.write_number_with_format(row, 3, to_cell(*difference), difference_format)?;

                match deviation {
                    Deviation::Percent(p) => {
                        worksheet.write_number_with_format(row, 4, to_cell(*p), &percent)?;
                    }
                    Deviation::DivideByZero => {
                        worksheet.write_string(row, 4, "inf")?;
                    }
                }
            }
            ReferenceMatch::Unmatched => {
                worksheet.write_string(row, 2, NOT_FOUND)?;
                worksheet.write_string(row, 3, NOT_FOUND)?;
                worksheet.write_string(row, 4, NOT_FOUND)?;
            }
        }
    }

    for (col, width) in column_widths(records).iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    workbook.save(path)?;
    Ok(ReportOutcome::Written {
        rows: records.len(),
    })
}

fn to_cell(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Auto-size each column to its longest rendered value plus padding.
fn column_widths(records: &[DiscrepancyRecord]) -> [f64; 5] {
    let mut max_len: [usize; 5] = [0; 5];
    for (col, title) in HEADERS.iter().enumerate() {
        max_len[col] = title.len();
    }

    for record in records {
        let rendered = rendered_row(record);
        for (col, text) in rendered.iter().enumerate() {
            max_len[col] = max_len[col].max(text.len());
        }
    }

    max_len.map(|len| (len + 2) as f64 * 1.2)
}

/// The row as it appears in the sheet, for width measurement.
fn rendered_row(record: &DiscrepancyRecord) -> [String; 5] {
    match &record.outcome {
        ReferenceMatch::Matched {
            reference_total,
            difference,
            deviation,
        } => [
            record.item.clone(),
            money_string(record.invoice_total),
            money_string(*reference_total),
            money_string(*difference),
            deviation.to_string(),
        ],
        ReferenceMatch::Unmatched => [
            record.item.clone(),
            money_string(record.invoice_total),
            NOT_FOUND.to_string(),
            NOT_FOUND.to_string(),
            NOT_FOUND.to_string(),
        ],
    }
}

/// Render a value the way the #,##0.00 cell format displays it.
fn money_string(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    if negative {
        grouped.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push('.');
    grouped.push_str(frac_part);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_string_grouping() {
        assert_eq!(money_string(dec!(0)), "0.00");
        assert_eq!(money_string(dec!(999.9)), "999.90");
        assert_eq!(money_string(dec!(1050)), "1,050.00");
        assert_eq!(money_string(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(money_string(dec!(-1050)), "-1,050.00");
    }

    #[test]
    fn test_column_widths_cover_headers_and_values() {
        let record = DiscrepancyRecord {
            item: "A very long item name indeed".into(),
            invoice_total: dec!(20),
            outcome: ReferenceMatch::Unmatched,
        };

        let widths = column_widths(std::slice::from_ref(&record));
        // Item column sized by the value, the rest by their headers.
        assert!(widths[0] > widths[1]);
        for width in widths {
            assert!(width > 0.0);
        }
    }

    #[test]
    fn test_empty_records_produce_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let outcome = write_report(&[], &path).unwrap();
        assert_eq!(outcome, ReportOutcome::Empty);
        assert!(!path.exists());
    }
}
