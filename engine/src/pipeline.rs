// Entries -> annotated records. Always recomputed from scratch.
use shared::models::{ReportEntry, ReportRecord};

use crate::data::normalize::{combined_text, parse_entry_date};
use crate::detection::KeywordDetector;

/// Derives date, search corpus and both detector flags for every entry.
pub fn recompute(entries: &[ReportEntry], detector: &KeywordDetector) -> Vec<ReportRecord> {
    let records: Vec<ReportRecord> = entries
        .iter()
        .map(|entry| {
            let combined_text = combined_text(entry);
            ReportRecord {
                date: parse_entry_date(entry),
                mentions_battery: detector.mentions_battery(&combined_text),
                is_replacement: detector.is_replacement(&combined_text),
                combined_text,
                entry: entry.clone(),
            }
        })
        .collect();

    tracing::debug!(
        records = records.len(),
        battery = records.iter().filter(|r| r.mentions_battery).count(),
        replacements = records.iter().filter(|r| r.is_replacement).count(),
        "Recomputed report records"
    );
    records
}
