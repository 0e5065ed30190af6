use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single extracted table cell.
///
/// Coercion happens once, at extraction time: cells that look purely
/// numeric become `Number`, everything else stays a trimmed `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One invoice line item.
///
/// `item` and `total` are required for a row to count as a line item;
/// the remaining columns are carried through opportunistically, keyed
/// by their normalized header label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as it appeared on the invoice.
    pub item: String,
    /// Total as extracted; the reconciler normalizes it for comparison.
    pub total: CellValue,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, CellValue>,
}
