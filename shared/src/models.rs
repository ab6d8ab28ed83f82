use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One maintenance report row in its persisted shape.
///
/// This is what the source report, the persisted report and the manual
/// addition log all store. Derived fields live on [`ReportRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub numero_laudo: String,
    pub data: String,
    pub frota: String,
    pub parecer: String,
    pub analise: String,
    pub conclusao: String,
}

impl ReportEntry {
    /// Values in the order of `columns::EXPECTED`.
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.numero_laudo,
            &self.data,
            &self.frota,
            &self.parecer,
            &self.analise,
            &self.conclusao,
        ]
    }
}

/// A report entry annotated with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(flatten)]
    pub entry: ReportEntry,
    /// Day-first parse of `entry.data`; `None` when the text is not a date.
    pub date: Option<NaiveDate>,
    /// Upper-cased concatenation of the three narrative fields.
    pub combined_text: String,
    pub mentions_battery: bool,
    pub is_replacement: bool,
}

/// Expected battery life window for one fleet unit, anchored on its most
/// recent replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLifeWindow {
    pub frota: String,
    pub last_replacement: NaiveDate,
    pub expected_end: NaiveDate,
    pub days_since: i64,
    pub days_total_expected: i64,
    /// Negative once the window is overdue.
    pub days_remaining: i64,
    /// Always within [0, 1].
    pub fraction_elapsed: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementCount {
    pub frota: String,
    pub count: usize,
}

/// Gap between two consecutive dated replacements of the same unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementInterval {
    pub frota: String,
    pub previous: NaiveDate,
    pub current: NaiveDate,
    pub days: i64,
}
