//! Report loading through an ordered chain of candidate parsers.
//!
//! Each candidate either produces a [`ReportTable`] or fails; the first
//! success wins. When every candidate fails (or there is no source at all)
//! the loader degrades to the canonical empty schema and reports why as
//! warnings. Loading never fails hard.

use std::path::{Path, PathBuf};

use super::csv_parser::DelimitedReportParser;
use super::encoding::TextEncoding;
use super::report_table::ReportTable;
use super::spreadsheet::SpreadsheetReportParser;
use crate::error::Result;

/// One way of turning a file into a table.
pub trait ReportParser {
    fn name(&self) -> &str;
    fn parse(&self, path: &Path) -> Result<ReportTable>;
}

pub struct SpreadsheetParser;

impl ReportParser for SpreadsheetParser {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn parse(&self, path: &Path) -> Result<ReportTable> {
        SpreadsheetReportParser::load_table(path)
    }
}

pub struct DelimitedParser {
    name: String,
    encoding: TextEncoding,
}

impl DelimitedParser {
    pub fn new(encoding: TextEncoding) -> Self {
        DelimitedParser {
            name: format!("delimited ({})", encoding.name()),
            encoding,
        }
    }
}

impl ReportParser for DelimitedParser {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, path: &Path) -> Result<ReportTable> {
        DelimitedReportParser::load_table(path, self.encoding)
    }
}

/// Spreadsheet first, then delimited text in utf-8, windows-1252, latin-1.
/// Latin-1 accepts any byte, so it closes the chain.
pub fn default_parsers() -> Vec<Box<dyn ReportParser>> {
    vec![
        Box::new(SpreadsheetParser),
        Box::new(DelimitedParser::new(TextEncoding::Utf8)),
        Box::new(DelimitedParser::new(TextEncoding::Windows1252)),
        Box::new(DelimitedParser::new(TextEncoding::Latin1)),
    ]
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: ReportTable,
    /// File the table came from; `None` when falling back to the empty schema.
    pub source: Option<PathBuf>,
    /// Name of the parser that succeeded.
    pub parser: Option<String>,
    pub warnings: Vec<String>,
}

impl LoadOutcome {
    fn empty(warnings: Vec<String>) -> Self {
        LoadOutcome {
            table: ReportTable::empty_schema(),
            source: None,
            parser: None,
            warnings,
        }
    }
}

/// Tries each parser in order on `path`, stopping at the first success.
pub fn load_with(path: &Path, parsers: &[Box<dyn ReportParser>]) -> LoadOutcome {
    let mut failures = Vec::new();
    for parser in parsers {
        tracing::debug!(path = %path.display(), parser = parser.name(), "Trying report parser");
        match parser.parse(path) {
            Ok(table) => {
                tracing::info!(
                    path = %path.display(),
                    parser = parser.name(),
                    rows = table.len(),
                    columns = ?table.headers,
                    "Loaded report"
                );
                return LoadOutcome {
                    table,
                    source: Some(path.to_path_buf()),
                    parser: Some(parser.name().to_string()),
                    warnings: Vec::new(),
                };
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), parser = parser.name(), error = %e, "Report parser failed");
                failures.push(format!("{}: {}", parser.name(), e));
            }
        }
    }

    tracing::warn!(path = %path.display(), "No parser could read the report; using an empty record set");
    let mut warnings = vec![format!(
        "could not read '{}'; using an empty record set. Add reports manually.",
        path.display()
    )];
    warnings.extend(failures);
    LoadOutcome::empty(warnings)
}

/// Loads the explicit report when given, otherwise the first default report
/// that exists, otherwise the empty schema.
pub fn load_report(explicit: Option<&Path>, default_reports: &[&Path]) -> LoadOutcome {
    let parsers = default_parsers();
    if let Some(path) = explicit {
        return load_with(path, &parsers);
    }
    match default_reports.iter().find(|p| p.is_file()) {
        Some(path) => load_with(path, &parsers),
        None => {
            let tried: Vec<String> = default_reports.iter().map(|p| p.display().to_string()).collect();
            tracing::warn!(?tried, "Default report not found");
            LoadOutcome::empty(vec![format!(
                "no report loaded ({} not found); using an empty record set. Add reports manually.",
                tried.join(", ")
            )])
        }
    }
}
