// Plain-text rendering for terminal output
use engine::data::ReportTable;
use engine::services::SessionSummary;
use shared::models::{ReplacementCount, ReplacementInterval};
use shared::utils::brazilian_format;
use std::fmt::Write;

/// Left-aligned columns separated by two spaces, with a rule under the header.
pub fn render_table(table: &ReportTable) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, table.headers.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &table.rows {
        push_line(&mut out, (0..widths.len()).map(|i| row.get(i).map_or("", String::as_str)), &widths);
    }
    let _ = write!(out, "({} rows)", table.len());
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn counts_table(counts: &[ReplacementCount]) -> ReportTable {
    let mut table = ReportTable::new(vec!["FROTA".to_string(), "TROCAS".to_string()]);
    table.rows = counts.iter().map(|c| vec![c.frota.clone(), c.count.to_string()]).collect();
    table
}

pub fn intervals_table(intervals: &[ReplacementInterval]) -> ReportTable {
    let mut table = ReportTable::new(
        ["FROTA", "ANTERIOR", "ATUAL", "DIAS"].iter().map(|h| h.to_string()).collect(),
    );
    table.rows = intervals
        .iter()
        .map(|i| {
            vec![
                i.frota.clone(),
                brazilian_format::format_date(i.previous),
                brazilian_format::format_date(i.current),
                i.days.to_string(),
            ]
        })
        .collect();
    table
}

pub fn render_summary(summary: &SessionSummary) -> String {
    let source = summary
        .source
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    let mut out = String::new();
    let _ = writeln!(out, "Report:                  {}", source);
    let _ = writeln!(out, "Records:                 {}", summary.records);
    let _ = writeln!(out, "Battery mentions:        {}", summary.battery_mentions);
    let _ = writeln!(out, "Replacements:            {}", summary.replacements);
    let _ = writeln!(out, "Units with replacement:  {}", summary.units_with_replacement);
    let _ = writeln!(out, "Overdue units:           {}", summary.overdue_units);
    let _ = writeln!(out, "PDF files:               {}", summary.pdf_files);
    let _ = write!(out, "Unprocessed PDFs:        {}", summary.unprocessed_pdfs);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let table = counts_table(&[
            ReplacementCount { frota: "A1".into(), count: 12 },
            ReplacementCount { frota: "LONGUNIT".into(), count: 3 },
        ]);
        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "FROTA     TROCAS");
        assert_eq!(lines[1], "--------  ------");
        assert_eq!(lines[2], "A1        12");
        assert_eq!(lines[3], "LONGUNIT  3");
        assert_eq!(lines[4], "(2 rows)");
    }

    #[test]
    fn intervals_use_day_first_dates() {
        let table = intervals_table(&[ReplacementInterval {
            frota: "A1".into(),
            previous: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            current: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            days: 137,
        }]);
        assert_eq!(table.rows[0], vec!["A1", "15/01/2023", "01/06/2023", "137"]);
    }
}
