use std::path::PathBuf;

use tally_core::extraction::pdftotext::PdftotextExtractor;
use tally_core::reconcile::ReconcileOptions;
use tally_core::reference::ReferenceTable;
use tally_core::report::{write_report, ReportOutcome};

use crate::output;

pub fn run(
    invoices: Vec<PathBuf>,
    reference_file: PathBuf,
    report_file: PathBuf,
    output_format: &str,
    show_all: bool,
) -> Result<(), tally_core::error::TallyError> {
    let reference = ReferenceTable::load(&reference_file)?;
    for warning in &reference.warnings {
        eprintln!("warning: reference: {} ({})", warning.reason, warning.text);
    }

    let extractor = PdftotextExtractor::new();
    let options = ReconcileOptions {
        include_matches: show_all,
    };
    let result = tally_core::check_invoices(&invoices, &extractor, &reference, &options)?;

    if !result.skipped.is_empty() {
        eprintln!(
            "{} invoice row(s) skipped during extraction",
            result.skipped.len()
        );
    }

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result),
    }

    match write_report(&result.records, &report_file)? {
        ReportOutcome::Written { rows } => {
            eprintln!(
                "Report with {} row(s) written to {}",
                rows,
                report_file.display()
            );
        }
        ReportOutcome::Empty => {
            eprintln!("No discrepancies found; no report written.");
        }
    }

    Ok(())
}
