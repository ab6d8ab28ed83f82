// Opening a session from the report on disk
use std::path::Path;

use super::ReportSession;
use crate::config::EngineSettings;
use crate::data::load_report;
use crate::data::normalize::entries_from_table;
use crate::error::Result;

impl ReportSession {
    /// Loads `report` when given, otherwise the persisted report (spreadsheet,
    /// then its delimited fallback). An unreadable or missing source yields an
    /// empty session with warnings; only an invalid keyword configuration is
    /// an error.
    pub fn open(settings: EngineSettings, report: Option<&Path>) -> Result<Self> {
        let mut session = Self::new(settings)?;
        let store = session.report_store();
        let outcome = load_report(report, &store.candidates());

        for warning in &outcome.warnings {
            tracing::warn!("{}", warning);
        }
        session.source = outcome.source;
        session.warnings = outcome.warnings;
        session.set_entries(entries_from_table(&outcome.table));

        tracing::info!(
            source = ?session.source,
            records = session.records.len(),
            replacements = session.replacements().len(),
            "Report session ready"
        );
        Ok(session)
    }

    /// Loads again from the same place, keeping the current keyword configuration.
    pub fn reload(&mut self) -> Result<()> {
        let source = self.source.clone();
        let reloaded = Self::open(self.settings.clone(), source.as_deref())?;
        *self = reloaded;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn settings_in(dir: &Path) -> EngineSettings {
        EngineSettings {
            data_dir: dir.join("dados"),
            output_dir: dir.join("saida"),
            ..Default::default()
        }
    }

    #[test]
    fn open_explicit_csv_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relatorio.csv");
        std::fs::write(
            &path,
            "Numero_Laudo;Data;Frota;Parecer;Analise;Conclusao;Tecnico\n\
             1;15/01/2023;A1;Bateria trocada;;;JOAO\n\
             2;xx/xx;B2;Bateria fraca;;;MARIA\n",
        )
        .unwrap();

        let session = ReportSession::open(settings_in(dir.path()), Some(path.as_path())).unwrap();
        assert_eq!(session.source(), Some(path.as_path()));
        assert!(session.warnings().is_empty());
        assert_eq!(session.records().len(), 2);
        assert!(session.records()[0].is_replacement);
        // unparseable date: still listed, just undated
        assert_eq!(session.records()[1].date, None);
        assert!(session.records()[1].mentions_battery);
    }

    #[test]
    fn open_without_report_is_empty_with_warning() {
        let dir = tempdir().unwrap();
        let session = ReportSession::open(settings_in(dir.path()), None).unwrap();
        assert!(session.records().is_empty());
        assert_eq!(session.warnings().len(), 1);
        assert!(session.source().is_none());
    }

    #[test]
    fn open_garbage_is_empty_with_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relatorio.xlsx");
        std::fs::write(&path, b"").unwrap();
        let session = ReportSession::open(settings_in(dir.path()), Some(path.as_path())).unwrap();
        assert!(session.records().is_empty());
        assert!(!session.warnings().is_empty());
    }
}
