use rust_decimal::Decimal;

use crate::model::LineItem;
use crate::parsing::values::parse_total;
use crate::reconcile::outcome::{Deviation, DiscrepancyRecord, ReferenceMatch};
use crate::reference::ReferenceTable;

/// Absolute difference below which invoice and reference totals are
/// treated as equal (allows for rounding in either source).
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Also emit matched rows whose difference is within tolerance.
    pub include_matches: bool,
}

/// Compare extracted line items against the reference table.
///
/// Emits one record per line item: matched rows whose absolute
/// difference exceeds the tolerance (all matched rows with
/// `include_matches`), and every unmatched row. Input order is
/// preserved, so repeated runs over the same inputs produce identical
/// output.
pub fn reconcile(
    items: &[LineItem],
    reference: &ReferenceTable,
    options: &ReconcileOptions,
) -> Vec<DiscrepancyRecord> {
    let mut records = Vec::new();

    for item in items {
        let invoice_total = parse_total(&item.total);

        let outcome = match reference.lookup(&item.item) {
            Some(entry) => {
                let difference = invoice_total - entry.total;
                if difference.abs() <= TOLERANCE && !options.include_matches {
                    continue;
                }

                let deviation = if entry.total.is_zero() {
                    Deviation::DivideByZero
                } else {
                    Deviation::Percent((difference / entry.total * Decimal::ONE_HUNDRED).abs())
                };

                ReferenceMatch::Matched {
                    reference_total: entry.total,
                    difference,
                    deviation,
                }
            }
            None => ReferenceMatch::Unmatched,
        };

        records.push(DiscrepancyRecord {
            item: item.item.clone(),
            invoice_total,
            outcome,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use rust_decimal_macros::dec;

    fn table(rows: &str) -> ReferenceTable {
        ReferenceTable::from_csv(rows.as_bytes()).unwrap()
    }

    fn item(name: &str, total: CellValue) -> LineItem {
        LineItem {
            item: name.into(),
            total,
            fields: Default::default(),
        }
    }

    #[test]
    fn test_overcharge_emitted_with_exact_difference() {
        let reference = table("Item,Total\nwidget a,1000.00\n");
        let items = vec![item("Widget A", CellValue::Text("$1,050.00".into()))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.item, "Widget A");
        assert_eq!(record.invoice_total, dec!(1050.00));
        assert_eq!(
            record.outcome,
            ReferenceMatch::Matched {
                reference_total: dec!(1000.00),
                difference: dec!(50.00),
                deviation: Deviation::Percent(dec!(5)),
            }
        );
    }

    #[test]
    fn test_undercharge_has_negative_difference() {
        let reference = table("Item,Total\nbolt,10.00\n");
        let items = vec![item("Bolt", CellValue::Number(dec!(8.00)))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        assert_eq!(records[0].difference(), Some(dec!(-2.00)));
        match &records[0].outcome {
            ReferenceMatch::Matched { deviation, .. } => {
                assert_eq!(*deviation, Deviation::Percent(dec!(20)));
            }
            ReferenceMatch::Unmatched => panic!("expected a match"),
        }
    }

    #[test]
    fn test_within_tolerance_suppressed() {
        let reference = table("Item,Total\nbolt,10.00\n");
        let items = vec![item("Bolt", CellValue::Number(dec!(9.999)))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_exactly_tolerance_suppressed() {
        let reference = table("Item,Total\nbolt,10.00\n");
        let items = vec![item("Bolt", CellValue::Number(dec!(10.01)))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_just_beyond_tolerance_emitted() {
        let reference = table("Item,Total\nbolt,10.00\n");
        let items = vec![item("Bolt", CellValue::Number(dec!(10.011)))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].difference(), Some(dec!(0.011)));
    }

    #[test]
    fn test_include_matches_keeps_within_tolerance_rows() {
        let reference = table("Item,Total\nbolt,10.00\n");
        let items = vec![item("Bolt", CellValue::Number(dec!(9.999)))];

        let options = ReconcileOptions {
            include_matches: true,
        };
        let records = reconcile(&items, &reference, &options);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].difference(), Some(dec!(-0.001)));
    }

    #[test]
    fn test_unmatched_always_emitted() {
        let reference = table("Item,Total\nwidget a,1000.00\n");
        let items = vec![item("Gadget Z", CellValue::Number(dec!(20.00)))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        assert_eq!(records.len(), 1);
        assert!(records[0].is_unmatched());
        assert_eq!(records[0].invoice_total, dec!(20.00));
    }

    #[test]
    fn test_zero_reference_total_flags_divide_by_zero() {
        let reference = table("Item,Total\nsample,0\n");
        let items = vec![item("Sample", CellValue::Number(dec!(5.00)))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        match &records[0].outcome {
            ReferenceMatch::Matched { deviation, .. } => {
                assert_eq!(*deviation, Deviation::DivideByZero);
            }
            ReferenceMatch::Unmatched => panic!("expected a match"),
        }
    }

    #[test]
    fn test_unparseable_total_compares_as_zero() {
        let reference = table("Item,Total\nbolt,10.00\n");
        let items = vec![item("Bolt", CellValue::Text("n/a".into()))];

        let records = reconcile(&items, &reference, &ReconcileOptions::default());
        assert_eq!(records[0].invoice_total, dec!(0));
        assert_eq!(records[0].difference(), Some(dec!(-10.00)));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let reference = table("Item,Total\na,1\nb,2\n");
        let items = vec![
            item("A", CellValue::Number(dec!(3))),
            item("C", CellValue::Number(dec!(9))),
            item("B", CellValue::Number(dec!(4))),
        ];

        let first = reconcile(&items, &reference, &ReconcileOptions::default());
        let second = reconcile(&items, &reference, &ReconcileOptions::default());
        assert_eq!(first, second);
        let names: Vec<&str> = first.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }
}
