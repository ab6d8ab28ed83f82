// Handler for manual report submissions
use serde::Serialize;
use shared::models::ReportEntry;
use std::path::PathBuf;

use super::ReportSession;
use crate::error::Result;
use crate::models::ManualSubmission;
use crate::store::MergeReport;

#[derive(Debug, Clone)]
pub struct ManualAddition {
    /// One entry per unit named in the submission.
    pub entries: Vec<ReportEntry>,
    pub log_path: PathBuf,
    /// `None` when even the delimited fallback could not be written.
    pub merge: Option<MergeReport>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManualAdditionView<'a> {
    pub added: usize,
    pub units: Vec<&'a str>,
    pub log_path: &'a std::path::Path,
    pub report_path: Option<&'a std::path::Path>,
    pub warnings: &'a [String],
}

impl ManualAddition {
    pub fn view(&self) -> ManualAdditionView<'_> {
        ManualAdditionView {
            added: self.entries.len(),
            units: self.entries.iter().map(|e| e.frota.as_str()).collect(),
            log_path: &self.log_path,
            report_path: self.merge.as_ref().map(|m| m.outcome.path()),
            warnings: &self.warnings,
        }
    }
}

impl ReportSession {
    /// Validates the submission, appends it to the manual log, merges it into
    /// the persisted report and recomputes every record.
    ///
    /// A validation failure or a failed log append persists nothing. Once the
    /// log holds the rows, report-merge problems are returned as warnings.
    pub fn add_manual(&mut self, submission: &ManualSubmission) -> Result<ManualAddition> {
        let entries = submission.into_entries()?;
        tracing::info!(
            numero_laudo = %submission.numero_laudo.trim(),
            units = entries.len(),
            "Received manual submission"
        );

        self.settings.ensure_dirs()?;
        let log = self.manual_log();
        log.append(&entries)?;

        let mut warnings = Vec::new();
        let merge = match self.report_store().merge(&entries) {
            Ok(report) => {
                warnings.extend(report.warnings.iter().cloned());
                Some(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist manual entry into the report");
                warnings.push(format!("manual entry logged but the report could not be saved: {}", e));
                None
            }
        };

        let mut all = std::mem::take(&mut self.entries);
        all.extend(entries.iter().cloned());
        self.set_entries(all);

        Ok(ManualAddition {
            entries,
            log_path: log.path().to_path_buf(),
            merge,
            warnings,
        })
    }
}
