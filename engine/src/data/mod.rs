// Reading, writing and normalizing maintenance reports.
pub mod csv_parser;
pub mod encoding;
pub mod normalize;
pub mod report_source;
pub mod report_table;
pub mod spreadsheet;

pub use report_source::{load_report, LoadOutcome};
pub use report_table::ReportTable;
