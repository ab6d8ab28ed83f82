// engine/src/services/report_session/mod.rs
// The report session: the loaded entries, the detector built from the current
// keyword configuration, and the annotated records derived from both.
// Every mutation goes through `set_entries`, which recomputes from scratch.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::models::{EquipmentLifeWindow, ReplacementCount, ReplacementInterval, ReportEntry, ReportRecord};
use std::path::{Path, PathBuf};

use crate::config::EngineSettings;
use crate::detection::{KeywordConfig, KeywordDetector};
use crate::error::Result;
use crate::lifecycle::{self, LifeCycleEstimator};
use crate::pipeline::recompute;
use crate::store::{ManualLog, ReportStore};

pub mod add_manual_entry;
pub mod export;
pub mod load_report;

pub use add_manual_entry::ManualAddition;

pub struct ReportSession {
    settings: EngineSettings,
    detector: KeywordDetector,
    estimator: LifeCycleEstimator,
    entries: Vec<ReportEntry>,
    records: Vec<ReportRecord>,
    source: Option<PathBuf>,
    warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub source: Option<PathBuf>,
    pub records: usize,
    pub battery_mentions: usize,
    pub replacements: usize,
    pub units_with_replacement: usize,
    pub overdue_units: usize,
    pub pdf_files: usize,
    pub unprocessed_pdfs: usize,
}

impl ReportSession {
    /// A session with no entries.
    pub fn new(settings: EngineSettings) -> Result<Self> {
        let detector = KeywordDetector::new(&settings.keywords)?;
        let estimator = LifeCycleEstimator::new(settings.life_months);
        Ok(ReportSession {
            settings,
            detector,
            estimator,
            entries: Vec::new(),
            records: Vec::new(),
            source: None,
            warnings: Vec::new(),
        })
    }

    pub fn with_entries(settings: EngineSettings, entries: Vec<ReportEntry>) -> Result<Self> {
        let mut session = Self::new(settings)?;
        session.set_entries(entries);
        Ok(session)
    }

    fn set_entries(&mut self, entries: Vec<ReportEntry>) {
        self.entries = entries;
        self.records = recompute(&self.entries, &self.detector);
    }

    /// Rebuilds the detector and re-derives every record.
    pub fn set_keywords(&mut self, keywords: KeywordConfig) -> Result<()> {
        self.detector = KeywordDetector::new(&keywords)?;
        self.settings.keywords = keywords;
        self.records = recompute(&self.entries, &self.detector);
        Ok(())
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Non-fatal problems met while loading.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    pub fn replacements(&self) -> Vec<&ReportRecord> {
        self.records.iter().filter(|r| r.is_replacement).collect()
    }

    pub fn battery_mentions(&self) -> Vec<&ReportRecord> {
        self.records.iter().filter(|r| r.mentions_battery).collect()
    }

    pub fn life_table(&self, today: NaiveDate) -> Vec<EquipmentLifeWindow> {
        self.estimator.estimate(&self.records, today)
    }

    /// Life table as of the current UTC calendar date.
    pub fn life_table_today(&self) -> Vec<EquipmentLifeWindow> {
        self.life_table(Utc::now().date_naive())
    }

    pub fn replacement_counts(&self) -> Vec<ReplacementCount> {
        lifecycle::replacement_counts(&self.records)
    }

    pub fn top_units(&self, n: usize) -> Vec<ReplacementCount> {
        lifecycle::top_units(&self.records, n)
    }

    pub fn replacement_intervals(&self) -> Vec<ReplacementInterval> {
        lifecycle::replacement_intervals(&self.records)
    }

    /// Distinct report numbers, in first-seen order.
    pub fn report_numbers(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .map(|e| e.numero_laudo.as_str())
            .filter(|n| seen.insert(*n))
            .collect()
    }

    pub fn unprocessed_documents(&self) -> Result<Vec<String>> {
        crate::exports::unprocessed_documents(&self.settings.data_dir, &self.report_numbers())
    }

    pub fn summary(&self, today: NaiveDate) -> Result<SessionSummary> {
        let life = self.life_table(today);
        let mut units: Vec<&str> = self
            .records
            .iter()
            .filter(|r| r.is_replacement)
            .map(|r| r.entry.frota.as_str())
            .collect();
        units.sort_unstable();
        units.dedup();
        Ok(SessionSummary {
            source: self.source.clone(),
            records: self.records.len(),
            battery_mentions: self.battery_mentions().len(),
            replacements: self.replacements().len(),
            units_with_replacement: units.len(),
            overdue_units: life.iter().filter(|w| w.days_remaining < 0).count(),
            pdf_files: crate::exports::pdf_count(&self.settings.data_dir)?,
            unprocessed_pdfs: self.unprocessed_documents()?.len(),
        })
    }

    pub fn manual_log(&self) -> ManualLog {
        ManualLog::new(self.settings.manual_log_path())
    }

    pub fn report_store(&self) -> ReportStore {
        ReportStore::new(self.settings.report_path(), self.settings.report_fallback_path())
    }
}
