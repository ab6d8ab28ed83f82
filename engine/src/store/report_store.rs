// The persisted report that manual additions are merged into.
use shared::columns;
use shared::models::ReportEntry;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::data::csv_parser::DelimitedReportParser;
use crate::data::report_source;
use crate::data::spreadsheet::SpreadsheetReportParser;
use crate::data::ReportTable;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Written in the native spreadsheet format.
    Spreadsheet(PathBuf),
    /// Spreadsheet write failed; the report went to delimited text instead.
    DelimitedFallback { path: PathBuf, reason: String },
}

impl PersistOutcome {
    pub fn path(&self) -> &Path {
        match self {
            PersistOutcome::Spreadsheet(path) => path,
            PersistOutcome::DelimitedFallback { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MergeReport {
    pub outcome: PersistOutcome,
    pub total_rows: usize,
    pub warnings: Vec<String>,
}

pub struct ReportStore {
    report_path: PathBuf,
    fallback_path: PathBuf,
}

impl ReportStore {
    pub fn new(report_path: impl Into<PathBuf>, fallback_path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: report_path.into(),
            fallback_path: fallback_path.into(),
        }
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    pub fn fallback_path(&self) -> &Path {
        &self.fallback_path
    }

    /// Where the loader should look, in order. The spreadsheet comes first
    /// unless the delimited fallback was written after it, in which case the
    /// fallback holds the latest rows.
    pub fn candidates(&self) -> [&Path; 2] {
        let (report, fallback) = (self.report_path.as_path(), self.fallback_path.as_path());
        match (modified(report), modified(fallback)) {
            (Some(report_time), Some(fallback_time)) if fallback_time > report_time => [fallback, report],
            _ => [report, fallback],
        }
    }

    /// Reads the current report (or starts from the empty schema), appends the
    /// entries and writes everything back. Columns the report already has are
    /// kept, including ones outside the canonical set. Only a failure of the
    /// delimited fallback itself is an error.
    pub fn merge(&self, entries: &[ReportEntry]) -> Result<MergeReport> {
        let mut warnings = Vec::new();
        let mut table = self.read_existing(&mut warnings);

        for entry in entries {
            let values: Vec<(&str, &str)> = columns::EXPECTED.iter().copied().zip(entry.fields()).collect();
            table.push_named(&values);
        }

        let outcome = match SpreadsheetReportParser::write_table(&self.report_path, &table) {
            Ok(()) => {
                tracing::info!(path = %self.report_path.display(), rows = table.len(), "Saved report");
                PersistOutcome::Spreadsheet(self.report_path.clone())
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.report_path.display(),
                    fallback = %self.fallback_path.display(),
                    error = %e,
                    "Could not save spreadsheet report; falling back to delimited text"
                );
                DelimitedReportParser::write_table(&self.fallback_path, &table)?;
                warnings.push(format!(
                    "could not save '{}' ({}); report saved as '{}' instead",
                    self.report_path.display(),
                    e,
                    self.fallback_path.display()
                ));
                PersistOutcome::DelimitedFallback {
                    path: self.fallback_path.clone(),
                    reason: e.to_string(),
                }
            }
        };

        Ok(MergeReport {
            outcome,
            total_rows: table.len(),
            warnings,
        })
    }

    fn read_existing(&self, warnings: &mut Vec<String>) -> ReportTable {
        let Some(path) = self.candidates().into_iter().find(|p| p.is_file()) else {
            return ReportTable::empty_schema();
        };
        let outcome = report_source::load_with(path, &report_source::default_parsers());
        if outcome.source.is_none() {
            warnings.push(format!(
                "existing report '{}' could not be read; starting a new one",
                path.display()
            ));
        }
        outcome.table
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .and_then(|meta| meta.modified().ok())
}
