pub mod normalize;
pub mod values;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extraction::table::{find_table_regions, split_by_whitespace_gaps};
use crate::extraction::PageContent;
use crate::model::{CellValue, LineItem};
use normalize::normalize_header;
use values::coerce_cell;

/// A table row that was seen but not turned into a line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    pub text: String,
    pub reason: String,
}

/// Result of extracting one invoice document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedInvoice {
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
}

/// Parse extracted page content into invoice line items.
///
/// Each line-item table uses its header row as the field-name schema:
/// normalized header labels are zipped against the cells of every data
/// row below it. Rows lacking a usable item name or total are dropped
/// and recorded in `skipped`; a page without a header-marker row
/// contributes nothing.
pub fn parse_line_items(pages: &[PageContent]) -> ParsedInvoice {
    let mut parsed = ParsedInvoice::default();

    for page in pages {
        for region in find_table_regions(page) {
            let headers: Vec<String> = split_by_whitespace_gaps(&page.lines[region.header_line])
                .iter()
                .map(|h| normalize_header(h))
                .collect();

            for line in &page.lines[region.start_line..region.end_line] {
                if line.trim().is_empty() {
                    continue;
                }

                match build_item(&headers, line) {
                    Ok(item) => parsed.items.push(item),
                    Err(reason) => parsed.skipped.push(SkippedRow {
                        text: line.trim().to_string(),
                        reason,
                    }),
                }
            }
        }
    }

    parsed
}

/// Zip normalized headers against the cells of one data row.
fn build_item(headers: &[String], line: &str) -> Result<LineItem, String> {
    let cells = split_by_whitespace_gaps(line);

    let mut fields: BTreeMap<String, CellValue> = BTreeMap::new();
    for (header, cell) in headers.iter().zip(cells.iter()) {
        fields.insert(header.clone(), coerce_cell(cell));
    }

    let item = match fields.remove("item") {
        Some(CellValue::Text(name)) if !name.is_empty() => name,
        // Purely numeric item codes still count as names.
        Some(CellValue::Number(code)) => code.to_string(),
        _ => return Err("missing item name".into()),
    };

    let total = fields
        .remove("total")
        .ok_or_else(|| "missing total".to_string())?;

    Ok(LineItem {
        item,
        total,
        fields,
    })
}
