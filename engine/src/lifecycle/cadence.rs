// Replacement cadence: how often, and how far apart, each unit gets a battery.
use chrono::NaiveDate;
use shared::models::{ReplacementCount, ReplacementInterval, ReportRecord};
use std::collections::BTreeMap;

/// Replacement-flagged records per unit, undated ones included.
/// Highest count first; ties by unit id.
pub fn replacement_counts(records: &[ReportRecord]) -> Vec<ReplacementCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_replacement) {
        *counts.entry(record.entry.frota.as_str()).or_default() += 1;
    }
    let mut counts: Vec<ReplacementCount> = counts
        .into_iter()
        .map(|(frota, count)| ReplacementCount { frota: frota.to_string(), count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.frota.cmp(&b.frota)));
    counts
}

pub fn top_units(records: &[ReportRecord], n: usize) -> Vec<ReplacementCount> {
    let mut counts = replacement_counts(records);
    counts.truncate(n);
    counts
}

/// Days between consecutive dated replacements of each unit, in date order.
pub fn replacement_intervals(records: &[ReportRecord]) -> Vec<ReplacementInterval> {
    let mut dates_by_unit: BTreeMap<&str, Vec<NaiveDate>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_replacement) {
        if let Some(date) = record.date {
            dates_by_unit.entry(record.entry.frota.as_str()).or_default().push(date);
        }
    }

    dates_by_unit
        .into_iter()
        .flat_map(|(frota, mut dates)| {
            dates.sort();
            dates
                .windows(2)
                .map(|pair| ReplacementInterval {
                    frota: frota.to_string(),
                    previous: pair[0],
                    current: pair[1],
                    days: (pair[1] - pair[0]).num_days(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
