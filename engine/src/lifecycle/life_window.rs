// Expected battery life per fleet unit, anchored on its latest replacement.
use chrono::{Months, NaiveDate};
use shared::models::{EquipmentLifeWindow, ReportRecord};
use std::collections::BTreeMap;

pub struct LifeCycleEstimator {
    life_months: u32,
}

impl LifeCycleEstimator {
    pub fn new(life_months: u32) -> Self {
        Self { life_months }
    }

    pub fn life_months(&self) -> u32 {
        self.life_months
    }

    /// One window per unit with at least one dated replacement, most urgent
    /// (fewest days remaining) first.
    pub fn estimate(&self, records: &[ReportRecord], today: NaiveDate) -> Vec<EquipmentLifeWindow> {
        let mut last_by_unit: BTreeMap<&str, NaiveDate> = BTreeMap::new();
        for record in records.iter().filter(|r| r.is_replacement) {
            let Some(date) = record.date else { continue };
            last_by_unit
                .entry(record.entry.frota.as_str())
                .and_modify(|last| *last = (*last).max(date))
                .or_insert(date);
        }

        let mut windows: Vec<EquipmentLifeWindow> = last_by_unit
            .into_iter()
            .filter_map(|(frota, last)| self.window(frota, last, today))
            .collect();
        windows.sort_by(|a, b| a.days_remaining.cmp(&b.days_remaining).then_with(|| a.frota.cmp(&b.frota)));
        windows
    }

    fn window(&self, frota: &str, last_replacement: NaiveDate, today: NaiveDate) -> Option<EquipmentLifeWindow> {
        // Calendar-aware: Feb 29 + 12 months clamps to Feb 28.
        let Some(expected_end) = last_replacement.checked_add_months(Months::new(self.life_months)) else {
            tracing::warn!(frota, %last_replacement, "Expected end date out of range; skipping unit");
            return None;
        };
        let days_since = (today - last_replacement).num_days();
        let days_total_expected = (expected_end - last_replacement).num_days();
        let days_remaining = (expected_end - today).num_days();
        let fraction_elapsed = if days_total_expected > 0 {
            (days_since as f64 / days_total_expected as f64).clamp(0.0, 1.0)
        } else if days_since >= 0 {
            1.0
        } else {
            0.0
        };

        Some(EquipmentLifeWindow {
            frota: frota.to_string(),
            last_replacement,
            expected_end,
            days_since,
            days_total_expected,
            days_remaining,
            fraction_elapsed,
        })
    }
}

impl Default for LifeCycleEstimator {
    fn default() -> Self {
        Self::new(12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ReportEntry;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn replacement(frota: &str, date: Option<NaiveDate>) -> ReportRecord {
        ReportRecord {
            entry: ReportEntry { frota: frota.to_string(), ..Default::default() },
            date,
            combined_text: "BATERIA TROCADA".to_string(),
            mentions_battery: true,
            is_replacement: true,
        }
    }

    #[test]
    fn test_latest_replacement_anchors_window() {
        let records = vec![
            replacement("A1", Some(ymd(2023, 1, 15))),
            replacement("A1", Some(ymd(2023, 6, 1))),
        ];
        let windows = LifeCycleEstimator::default().estimate(&records, ymd(2023, 12, 1));

        assert_eq!(windows.len(), 1);
        let w = &windows[0];
        assert_eq!(w.last_replacement, ymd(2023, 6, 1));
        assert_eq!(w.expected_end, ymd(2024, 6, 1));
        assert_eq!(w.days_total_expected, 366);
        assert_eq!(w.days_since, 183);
        assert_eq!(w.days_remaining, 183);
        assert!((w.fraction_elapsed - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_replacements_gives_empty_table() {
        let mut record = replacement("A1", Some(ymd(2023, 1, 15)));
        record.is_replacement = false;
        assert!(LifeCycleEstimator::default().estimate(&[record], ymd(2024, 1, 1)).is_empty());
        assert!(LifeCycleEstimator::default().estimate(&[], ymd(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_overdue_clamps_fraction_not_remaining() {
        let records = vec![replacement("B2", Some(ymd(2020, 3, 10)))];
        let w = &LifeCycleEstimator::default().estimate(&records, ymd(2026, 1, 1))[0];
        assert_eq!(w.fraction_elapsed, 1.0);
        assert!(w.days_remaining < 0);
        assert_eq!(w.days_remaining, (ymd(2021, 3, 10) - ymd(2026, 1, 1)).num_days());
    }

    #[test]
    fn test_future_replacement_clamps_to_zero() {
        let records = vec![replacement("C3", Some(ymd(2025, 1, 1)))];
        let w = &LifeCycleEstimator::default().estimate(&records, ymd(2024, 12, 1))[0];
        assert_eq!(w.fraction_elapsed, 0.0);
        assert!(w.days_since < 0);
    }

    #[test]
    fn test_fraction_always_in_unit_interval() {
        let records = vec![replacement("A1", Some(ymd(2023, 6, 1)))];
        let estimator = LifeCycleEstimator::default();
        for offset in (-800..2000).step_by(37) {
            let today = ymd(2023, 6, 1) + chrono::Duration::days(offset);
            let w = &estimator.estimate(&records, today)[0];
            assert!((0.0..=1.0).contains(&w.fraction_elapsed), "offset {offset}");
        }
    }

    #[test]
    fn test_end_of_month_clamping() {
        let records = vec![
            replacement("LEAP", Some(ymd(2024, 2, 29))),
            replacement("JAN", Some(ymd(2023, 1, 31))),
        ];
        let windows = LifeCycleEstimator::default().estimate(&records, ymd(2024, 3, 1));
        let leap = windows.iter().find(|w| w.frota == "LEAP").unwrap();
        let jan = windows.iter().find(|w| w.frota == "JAN").unwrap();
        assert_eq!(leap.expected_end, ymd(2025, 2, 28));
        assert_eq!(leap.days_total_expected, 365);
        assert_eq!(jan.expected_end, ymd(2024, 1, 31));
    }

    #[test]
    fn test_undated_replacements_are_excluded() {
        let records = vec![replacement("A1", None), replacement("B2", Some(ymd(2023, 5, 5)))];
        let windows = LifeCycleEstimator::default().estimate(&records, ymd(2023, 6, 1));
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].frota, "B2");
    }

    #[test]
    fn test_sorted_most_urgent_first() {
        let records = vec![
            replacement("NEW", Some(ymd(2023, 11, 1))),
            replacement("OLD", Some(ymd(2023, 1, 1))),
        ];
        let windows = LifeCycleEstimator::default().estimate(&records, ymd(2023, 12, 1));
        assert_eq!(windows[0].frota, "OLD");
        assert_eq!(windows[1].frota, "NEW");
    }

    #[test]
    fn test_custom_life_months() {
        let records = vec![replacement("A1", Some(ymd(2023, 1, 15)))];
        let w = &LifeCycleEstimator::new(6).estimate(&records, ymd(2023, 1, 15))[0];
        assert_eq!(w.expected_end, ymd(2023, 7, 15));
        assert_eq!(w.days_since, 0);
    }
}
