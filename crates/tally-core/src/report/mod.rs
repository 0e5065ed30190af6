pub mod xlsx;

pub use xlsx::{write_report, ReportOutcome};
