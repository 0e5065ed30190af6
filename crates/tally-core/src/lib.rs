pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod reconcile;
pub mod reference;
pub mod report;

use std::path::{Path, PathBuf};

use error::TallyError;
use extraction::TableExtractor;
use parsing::ParsedInvoice;
use reconcile::outcome::ReconciliationResult;
use reconcile::ReconcileOptions;
use reference::ReferenceTable;

/// Extract line items from one invoice document.
///
/// Idempotent per document: the same bytes always yield the same items.
/// A document without a recognizable line-item table yields an empty
/// result rather than an error.
pub fn extract_invoice(
    doc_bytes: &[u8],
    extractor: &dyn TableExtractor,
) -> Result<ParsedInvoice, TallyError> {
    let pages = extractor.extract_pages(doc_bytes)?;
    Ok(parsing::parse_line_items(&pages))
}

/// Main API entry point: extract every invoice and reconcile against
/// the reference table.
///
/// Invoices are processed in a strict sequential loop; records
/// accumulate in input order across documents. The reference table is
/// loaded by the caller, once, and shared read-only across all
/// comparisons. Inputs ending in `.json` are treated as pre-extracted
/// `ParsedInvoice` files instead of documents.
pub fn check_invoices(
    invoices: &[PathBuf],
    extractor: &dyn TableExtractor,
    reference: &ReferenceTable,
    options: &ReconcileOptions,
) -> Result<ReconciliationResult, TallyError> {
    let mut result = ReconciliationResult::default();

    for path in invoices {
        let bytes = std::fs::read(path)?;
        let parsed = if is_json(path) {
            serde_json::from_slice::<ParsedInvoice>(&bytes)?
        } else {
            extract_invoice(&bytes, extractor)?
        };

        result
            .records
            .extend(reconcile::reconcile(&parsed.items, reference, options));
        result.skipped.extend(parsed.skipped);
    }

    Ok(result)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
