use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parsing::SkippedRow;

/// Rendering of the "no reference row" sentinel in reports and summaries.
pub const NOT_FOUND: &str = "not found";

/// Percentage deviation of an invoice total from its reference total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    /// `abs(difference / reference_total) * 100`.
    Percent(Decimal),
    /// The reference total is exactly zero; the ratio is unbounded.
    DivideByZero,
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deviation::Percent(p) => write!(f, "{p:.2}%"),
            Deviation::DivideByZero => write!(f, "inf"),
        }
    }
}

/// Outcome of looking one invoice line item up in the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMatch {
    /// A reference row exists for the normalized item name.
    Matched {
        reference_total: Decimal,
        /// `invoice_total - reference_total`, exact.
        difference: Decimal,
        deviation: Deviation,
    },
    /// No reference row; rendered with the "not found" sentinel.
    Unmatched,
}

/// One row of the discrepancy report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyRecord {
    /// Item name as it appeared on the invoice.
    pub item: String,
    pub invoice_total: Decimal,
    pub outcome: ReferenceMatch,
}

impl DiscrepancyRecord {
    /// Signed difference, when a reference row was found.
    pub fn difference(&self) -> Option<Decimal> {
        match &self.outcome {
            ReferenceMatch::Matched { difference, .. } => Some(*difference),
            ReferenceMatch::Unmatched => None,
        }
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self.outcome, ReferenceMatch::Unmatched)
    }
}

/// All discrepancy records accumulated across one run, in input order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub records: Vec<DiscrepancyRecord>,
    /// Invoice rows dropped during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
}
