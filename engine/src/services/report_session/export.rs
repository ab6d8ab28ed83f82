// Handlers for the on-demand exports
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::ReportSession;
use crate::error::Result;
use crate::exports;

pub const REPLACEMENTS_EXPORT: &str = "trocas_bateria.csv";
pub const UNPROCESSED_EXPORT: &str = "pdfs_possiveis_nao_processados.csv";
pub const LIFE_EXPORT: &str = "vida_util_baterias.csv";
pub const HISTORY_EXPORT: &str = "manual_additions_export.csv";

impl ReportSession {
    fn export_path(&self, out: Option<&Path>, default_name: &str) -> Result<PathBuf> {
        match out {
            Some(path) => Ok(path.to_path_buf()),
            None => {
                self.settings.ensure_dirs()?;
                Ok(self.settings.output_dir.join(default_name))
            }
        }
    }

    /// Writes the detected-replacement subset. Returns the file written.
    pub fn export_replacements(&self, out: Option<&Path>) -> Result<PathBuf> {
        let path = self.export_path(out, REPLACEMENTS_EXPORT)?;
        exports::write(&path, &exports::replacements_table(&self.records))?;
        Ok(path)
    }

    /// Writes the PDFs that no report number refers to.
    pub fn export_unprocessed(&self, out: Option<&Path>) -> Result<PathBuf> {
        let names = self.unprocessed_documents()?;
        let path = self.export_path(out, UNPROCESSED_EXPORT)?;
        exports::write(&path, &exports::unprocessed_table(&names))?;
        Ok(path)
    }

    pub fn export_life_table(&self, today: NaiveDate, out: Option<&Path>) -> Result<PathBuf> {
        let path = self.export_path(out, LIFE_EXPORT)?;
        exports::write(&path, &exports::life_table(&self.life_table(today)))?;
        Ok(path)
    }

    /// Copies the manual addition log.
    pub fn export_history(&self, out: Option<&Path>) -> Result<PathBuf> {
        let path = self.export_path(out, HISTORY_EXPORT)?;
        self.manual_log().export(&path)?;
        Ok(path)
    }
}
