// Spreadsheet (xlsx/xls/ods) access for the maintenance report.
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::path::Path;

use super::report_table::ReportTable;
use crate::error::{EngineError, Result};

pub struct SpreadsheetReportParser;

impl SpreadsheetReportParser {
    /// Reads the first worksheet. The first non-empty row is the header.
    pub fn load_table(file_path: &Path) -> Result<ReportTable> {
        let mut workbook = open_workbook_auto(file_path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| EngineError::CsvDataFormatError("workbook has no worksheets".to_string()))??;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
            .skip_while(|row| row.iter().all(|c| c.trim().is_empty()));

        let headers = rows
            .next()
            .ok_or_else(|| EngineError::CsvDataFormatError("worksheet has no header row".to_string()))?;
        let mut table = ReportTable::new(headers);
        table.rows = rows.filter(|row| !row.iter().all(|c| c.trim().is_empty())).collect();
        Ok(table)
    }

    /// Writes the table to a single worksheet, every cell as text.
    pub fn write_table(file_path: &Path, table: &ReportTable) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string(0, to_col(col)?, header.as_str())?;
        }
        for (r, row) in table.rows.iter().enumerate() {
            let row_num = u32::try_from(r + 1)
                .map_err(|_| EngineError::ProcessingError("too many rows for a worksheet".to_string()))?;
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row_num, to_col(col)?, value.as_str())?;
                }
            }
        }
        workbook.save(file_path)?;
        Ok(())
    }
}

fn to_col(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| EngineError::ProcessingError("too many columns for a worksheet".to_string()))
}

/// Renders a cell the way it reads in the sheet: dates day-first, whole
/// numbers without a fractional part (report numbers are often stored as floats).
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if naive.time() == chrono::NaiveTime::MIN => naive.format("%d/%m/%Y").to_string(),
            Some(naive) => naive.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        other => other.to_string(),
    }
}
