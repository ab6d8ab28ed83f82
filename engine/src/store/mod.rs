// Persistence of manual additions: the append-only log and the merged report.
pub mod manual_log;
pub mod report_store;

pub use manual_log::ManualLog;
pub use report_store::{MergeReport, PersistOutcome, ReportStore};
