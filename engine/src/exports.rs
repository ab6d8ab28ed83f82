// Derived exports: replacement subset, unprocessed PDFs, life table.
use shared::columns;
use shared::models::{EquipmentLifeWindow, ReportRecord};
use std::path::Path;

use crate::data::csv_parser::DelimitedReportParser;
use crate::data::ReportTable;
use crate::error::Result;

pub const UNPROCESSED_COLUMN: &str = "arquivo";

pub fn replacements_table(records: &[ReportRecord]) -> ReportTable {
    let mut headers: Vec<String> = columns::EXPECTED.iter().map(|c| c.to_string()).collect();
    headers.push(columns::DATA_DT.to_string());
    let mut table = ReportTable::new(headers);
    table.rows = records
        .iter()
        .filter(|r| r.is_replacement)
        .map(|r| {
            let mut row: Vec<String> = r.entry.fields().iter().map(|f| f.to_string()).collect();
            row.push(r.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default());
            row
        })
        .collect();
    table
}

pub fn life_table(windows: &[EquipmentLifeWindow]) -> ReportTable {
    let mut table = ReportTable::new(
        [
            "FROTA",
            "DATA_DT",
            "EXPECTED_END",
            "DAYS_SINCE_TROCA",
            "DAYS_TOTAL_EXPECTED",
            "DAYS_REMAINING",
            "PCT_ELAPSED",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect(),
    );
    table.rows = windows
        .iter()
        .map(|w| {
            vec![
                w.frota.clone(),
                w.last_replacement.format("%Y-%m-%d").to_string(),
                w.expected_end.format("%Y-%m-%d").to_string(),
                w.days_since.to_string(),
                w.days_total_expected.to_string(),
                w.days_remaining.to_string(),
                format!("{:.4}", w.fraction_elapsed),
            ]
        })
        .collect();
    table
}

/// PDF file names in `data_dir` that contain none of the report numbers.
/// Blank report numbers are ignored; they would match every file.
/// A missing folder has no unprocessed documents.
pub fn unprocessed_documents<S: AsRef<str>>(data_dir: &Path, report_numbers: &[S]) -> Result<Vec<String>> {
    if !data_dir.is_dir() {
        return Ok(Vec::new());
    }
    let numbers: Vec<&str> = report_numbers
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .collect();

    let mut names = Vec::new();
    for dir_entry in std::fs::read_dir(data_dir)? {
        let path = dir_entry?.path();
        let is_pdf = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !numbers.iter().any(|n| name.contains(n)) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Number of PDF files in `data_dir`.
pub fn pdf_count(data_dir: &Path) -> Result<usize> {
    unprocessed_documents::<&str>(data_dir, &[]).map(|names| names.len())
}

pub fn unprocessed_table(names: &[String]) -> ReportTable {
    let mut table = ReportTable::new(vec![UNPROCESSED_COLUMN.to_string()]);
    table.rows = names.iter().map(|n| vec![n.clone()]).collect();
    table
}

pub fn write(out: &Path, table: &ReportTable) -> Result<()> {
    DelimitedReportParser::write_table(out, table)?;
    tracing::info!(path = %out.display(), rows = table.len(), "Exported table");
    Ok(())
}
