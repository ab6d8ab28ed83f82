// Engine settings: embedded JSON defaults, optionally overridden by a user file.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::detection::KeywordConfig;
use crate::error::{EngineError, Result};

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Folder holding the source PDFs of the reports.
    pub data_dir: PathBuf,
    /// Folder receiving the persisted report, the manual log and exports.
    pub output_dir: PathBuf,
    pub report_file: String,
    pub report_fallback_file: String,
    pub manual_log_file: String,
    /// Expected battery life after a replacement, in calendar months.
    pub life_months: u32,
    /// How many units the replacement ranking shows by default.
    pub top_units: usize,
    pub keywords: KeywordConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_dir: PathBuf::from("dados"),
            output_dir: PathBuf::from("saida"),
            report_file: "relatorio_tecnico_simplificado.xlsx".to_string(),
            report_fallback_file: "relatorio_tecnico_simplificado.csv".to_string(),
            manual_log_file: "manual_additions.csv".to_string(),
            life_months: 12,
            top_units: 30,
            keywords: KeywordConfig::default(),
        }
    }
}

impl EngineSettings {
    /// Settings from the embedded default configuration.
    pub fn load_default() -> Result<Self> {
        Self::from_json(DEFAULT_CONFIG)
    }

    /// Embedded defaults, then the user file on top when one is given.
    /// Keys missing from the user file keep their default value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Self::load_default(),
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    EngineError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
                })?;
                let settings = Self::from_json(&text)?;
                tracing::info!(path = %path.display(), "Loaded engine settings");
                Ok(settings)
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.report_file.trim().is_empty() {
            return Err(EngineError::ConfigError("report_file must not be empty".to_string()));
        }
        if self.manual_log_file.trim().is_empty() {
            return Err(EngineError::ConfigError("manual_log_file must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn report_fallback_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_fallback_file)
    }

    pub fn manual_log_path(&self) -> PathBuf {
        self.output_dir.join(&self.manual_log_file)
    }

    /// Creates the data and output folders when they are missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}
