// Append-only log of manually added reports.
use csv::WriterBuilder;
use shared::columns;
use shared::models::ReportEntry;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::data::csv_parser::DelimitedReportParser;
use crate::data::encoding::{self, TextEncoding};
use crate::data::normalize::entries_from_table;
use crate::data::ReportTable;
use crate::error::Result;

/// UTF-8 (with BOM) comma-separated file. The BOM and header are written
/// once, when the file is created; every later write only appends rows.
/// Existing rows are never rewritten.
pub struct ManualLog {
    path: PathBuf,
}

impl ManualLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn append(&self, entries: &[ReportEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let is_new = std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if is_new {
            file.write_all(encoding::bom())?;
        }

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        if is_new {
            wtr.write_record(columns::EXPECTED)?;
        }
        for entry in entries {
            wtr.write_record(entry.fields())?;
        }
        wtr.flush()?;

        tracing::info!(path = %self.path.display(), rows = entries.len(), created = is_new, "Appended to manual log");
        Ok(())
    }

    /// The log as written, or an empty table when nothing was logged yet.
    pub fn read_table(&self) -> Result<ReportTable> {
        if !self.exists() {
            return Ok(ReportTable::empty_schema());
        }
        DelimitedReportParser::load_table(&self.path, TextEncoding::Utf8)
    }

    pub fn read_entries(&self) -> Result<Vec<ReportEntry>> {
        Ok(entries_from_table(&self.read_table()?))
    }

    /// Copies the whole history to `out`. Returns the number of rows written.
    pub fn export(&self, out: &Path) -> Result<usize> {
        let table = self.read_table()?;
        DelimitedReportParser::write_table(out, &table)?;
        tracing::info!(path = %out.display(), rows = table.len(), "Exported manual history");
        Ok(table.len())
    }
}
