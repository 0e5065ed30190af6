pub mod engine;
pub mod outcome;

pub use engine::{reconcile, ReconcileOptions, TOLERANCE};
pub use outcome::{Deviation, DiscrepancyRecord, ReconciliationResult, ReferenceMatch};
