use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use calamine::Reader;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::parsing::normalize::{normalize_header, normalize_key};
use crate::parsing::SkippedRow;

/// One row of the reference price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Item name as written in the reference file.
    pub item: String,
    pub total: Decimal,
}

/// The reference price list, keyed by normalized item name.
///
/// Loaded once per run and read-only for all comparisons in that run.
/// When the file carries duplicate normalized item names the first row
/// wins; later rows are surfaced as warnings.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, ReferenceEntry>,
    /// Rows that could not be used, with reasons.
    pub warnings: Vec<SkippedRow>,
}

impl ReferenceTable {
    /// Load a reference table from disk, picking the format from the
    /// file extension (.xlsx/.xlsm/.xls or .csv).
    pub fn load(path: &Path) -> Result<ReferenceTable, TallyError> {
        let bytes = std::fs::read(path).map_err(|e| TallyError::ReferenceLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" => Self::from_workbook(&bytes),
            "csv" => Self::from_csv(&bytes[..]),
            other => Err(TallyError::ReferenceInvalid(format!(
                "unsupported reference file extension '{other}' (expected xlsx or csv)"
            ))),
        }
    }

    /// Parse a reference table from spreadsheet bytes.
    ///
    /// Reads the first worksheet; the first row is the header row.
    pub fn from_workbook(bytes: &[u8]) -> Result<ReferenceTable, TallyError> {
        let cursor = Cursor::new(bytes);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| TallyError::ReferenceInvalid(format!("failed to open workbook: {e}")))?;

        let first_sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| TallyError::ReferenceInvalid("workbook has no sheets".into()))?;
        let range = workbook
            .worksheet_range(&first_sheet)
            .map_err(|e| TallyError::ReferenceInvalid(format!("failed to read sheet: {e}")))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        Self::from_rows(rows)
    }

    /// Parse a reference table from CSV.
    pub fn from_csv<R: std::io::Read>(reader: R) -> Result<ReferenceTable, TallyError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record
                .map_err(|e| TallyError::ReferenceInvalid(format!("failed to read csv: {e}")))?;
            rows.push(record.iter().map(|c| c.trim().to_string()).collect());
        }

        Self::from_rows(rows)
    }

    fn from_rows(rows: Vec<Vec<String>>) -> Result<ReferenceTable, TallyError> {
        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| TallyError::ReferenceInvalid("reference table is empty".into()))?;

        let labels: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
        let item_col = labels.iter().position(|l| l == "item").ok_or_else(|| {
            TallyError::ReferenceInvalid("missing required column 'item'".into())
        })?;
        let total_col = labels.iter().position(|l| l == "total").ok_or_else(|| {
            TallyError::ReferenceInvalid("missing required column 'total'".into())
        })?;

        let mut table = ReferenceTable::default();

        for row in rows {
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }

            let item = row.get(item_col).map(|c| c.trim()).unwrap_or("");
            if item.is_empty() {
                table.warnings.push(SkippedRow {
                    text: row.join(", "),
                    reason: "blank item name".into(),
                });
                continue;
            }

            let raw_total = row.get(total_col).map(|c| c.trim()).unwrap_or("");
            let total = match Decimal::from_str(raw_total) {
                Ok(t) => t,
                Err(_) => {
                    table.warnings.push(SkippedRow {
                        text: row.join(", "),
                        reason: format!("non-numeric total '{raw_total}'"),
                    });
                    continue;
                }
            };

            let key = normalize_key(item);
            if table.entries.contains_key(&key) {
                table.warnings.push(SkippedRow {
                    text: row.join(", "),
                    reason: format!("duplicate item '{item}' (first row wins)"),
                });
                continue;
            }

            table.entries.insert(
                key,
                ReferenceEntry {
                    item: item.to_string(),
                    total,
                },
            );
        }

        if table.entries.is_empty() {
            return Err(TallyError::ReferenceInvalid(
                "no usable reference rows found".into(),
            ));
        }

        Ok(table)
    }

    /// Look up the reference row for an invoice item name.
    pub fn lookup(&self, item: &str) -> Option<&ReferenceEntry> {
        self.entries.get(&normalize_key(item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cell_to_string(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::String(s) => s.trim().to_string(),
        // Float display uses the shortest round-trip form, so 1050.0
        // becomes "1050" and parses cleanly as a Decimal.
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::DateTime(dt) => dt.to_string(),
        calamine::Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}
