// Table -> typed entries, and the derived fields every record carries.
use chrono::NaiveDate;
use shared::columns;
use shared::models::ReportEntry;
use shared::utils::brazilian_format;

use super::report_table::ReportTable;

/// Maps a table onto the canonical report columns. Column names match after
/// trimming and upper-casing; missing columns read as empty, extra columns
/// are ignored. Cells are kept as written, apart from the identifiers which
/// are trimmed.
pub fn entries_from_table(table: &ReportTable) -> Vec<ReportEntry> {
    let idx = |name: &str| table.column_index(name);
    let (laudo, data, frota) = (idx(columns::NUMERO_LAUDO), idx(columns::DATA), idx(columns::FROTA));
    let (parecer, analise, conclusao) = (idx(columns::PARECER), idx(columns::ANALISE), idx(columns::CONCLUSAO));

    let get = |row: usize, col: Option<usize>| col.map(|c| table.cell(row, c).to_string()).unwrap_or_default();

    let missing: Vec<&str> = columns::EXPECTED
        .iter()
        .copied()
        .filter(|name| table.column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Report is missing expected columns; treating them as empty");
    }

    (0..table.len())
        .map(|row| ReportEntry {
            numero_laudo: get(row, laudo).trim().to_string(),
            data: get(row, data),
            frota: get(row, frota).trim().to_string(),
            parecer: get(row, parecer),
            analise: get(row, analise),
            conclusao: get(row, conclusao),
        })
        .collect()
}

pub fn parse_entry_date(entry: &ReportEntry) -> Option<NaiveDate> {
    brazilian_format::parse_date(&entry.data)
}

/// The search corpus: the three narrative fields joined by single spaces,
/// upper-cased.
pub fn combined_text(entry: &ReportEntry) -> String {
    format!("{} {} {}", entry.parecer, entry.analise, entry.conclusao).to_uppercase()
}
