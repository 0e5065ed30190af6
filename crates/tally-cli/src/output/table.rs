use tally_core::parsing::ParsedInvoice;
use tally_core::reconcile::outcome::{ReconciliationResult, ReferenceMatch, NOT_FOUND};

/// Print the reconciliation summary as an aligned table.
pub fn print(result: &ReconciliationResult) {
    if result.records.is_empty() {
        println!("No discrepancies.");
        return;
    }

    let item_width = result
        .records
        .iter()
        .map(|r| r.item.len())
        .max()
        .unwrap_or(0)
        .max("Item".len());

    println!(
        "{:<width$}  {:>14}  {:>14}  {:>12}  {:>10}",
        "Item",
        "Invoice",
        "Reference",
        "Difference",
        "Deviation",
        width = item_width
    );

    for record in &result.records {
        let invoice = format!("{:.2}", record.invoice_total);
        match &record.outcome {
            ReferenceMatch::Matched {
                reference_total,
                difference,
                deviation,
            } => {
                println!(
                    "{:<width$}  {:>14}  {:>14}  {:>12}  {:>10}",
                    record.item,
                    invoice,
                    format!("{reference_total:.2}"),
                    format!("{difference:.2}"),
                    deviation.to_string(),
                    width = item_width
                );
            }
            ReferenceMatch::Unmatched => {
                println!(
                    "{:<width$}  {:>14}  {:>14}  {:>12}  {:>10}",
                    record.item,
                    invoice,
                    NOT_FOUND,
                    NOT_FOUND,
                    NOT_FOUND,
                    width = item_width
                );
            }
        }
    }
}

/// Format extracted line items for stdout.
pub fn format_parsed(parsed: &ParsedInvoice) -> String {
    let mut out = String::new();

    if parsed.items.is_empty() {
        out.push_str("No line items found.\n");
    } else {
        let item_width = parsed
            .items
            .iter()
            .map(|i| i.item.len())
            .max()
            .unwrap_or(0)
            .max("Item".len());

        out.push_str(&format!(
            "{:<width$}  {:>14}\n",
            "Item",
            "Total",
            width = item_width
        ));
        for item in &parsed.items {
            out.push_str(&format!(
                "{:<width$}  {:>14}\n",
                item.item,
                item.total.to_string(),
                width = item_width
            ));
        }
    }

    if !parsed.skipped.is_empty() {
        out.push_str(&format!(
            "\n{} row(s) skipped during extraction\n",
            parsed.skipped.len()
        ));
    }

    out
}
