// Command-line surface of the engine binary
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::config::EngineSettings;
use engine::models::ManualSubmission;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "engine",
    version,
    about = "Battery replacement detection and remaining-life tracking over fleet maintenance reports"
)]
pub struct Cli {
    /// JSON settings file layered over the built-in defaults.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Report to load instead of the persisted one.
    #[arg(long, global = true, value_name = "PATH")]
    pub report: Option<PathBuf>,
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Comma-separated battery terms, e.g. "BATERIA,BATT".
    #[arg(long, global = true, value_name = "TERMS")]
    pub battery_terms: Option<String>,
    /// Comma-separated replacement terms, e.g. "TROCA,SUBSTITUI".
    #[arg(long, global = true, value_name = "TERMS")]
    pub replacement_terms: Option<String>,
    #[arg(long, global = true, value_name = "MONTHS")]
    pub life_months: Option<u32>,
    /// Print JSON instead of plain tables.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Totals for the loaded report.
    Summary,
    /// Records detected as battery replacements.
    Replacements,
    /// Expected end of battery life per unit.
    Life,
    /// Replacements per unit, most frequent first.
    Counts(CountsArgs),
    /// Days between consecutive replacements of the same unit.
    Intervals,
    /// PDFs in the data folder that no report number refers to.
    Unprocessed,
    /// Record a report by hand, one row per unit.
    Add(AddArgs),
    /// Contents of the manual addition log.
    History,
    /// Write one of the tables to a CSV file.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct CountsArgs {
    /// Defaults to the configured `top_units`.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, value_name = "NUMERO_LAUDO")]
    pub laudo: String,
    /// Day-first date, e.g. 10/05/2024.
    #[arg(long)]
    pub data: String,
    /// One or more unit ids separated by commas.
    #[arg(long)]
    pub frota: String,
    #[arg(long, default_value = "")]
    pub parecer: String,
    #[arg(long, default_value = "")]
    pub analise: String,
    #[arg(long, default_value = "")]
    pub conclusao: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    Replacements,
    Unprocessed,
    Life,
    History,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub target: ExportTarget,
    /// Defaults to the standard file name inside the output folder.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line win over the settings file.
    pub fn apply_overrides(&self, settings: &mut EngineSettings) {
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(terms) = &self.battery_terms {
            settings.keywords.battery_terms = terms.clone();
        }
        if let Some(terms) = &self.replacement_terms {
            settings.keywords.replacement_terms = terms.clone();
        }
        if let Some(months) = self.life_months {
            settings.life_months = months;
        }
    }
}

impl AddArgs {
    pub fn submission(&self) -> ManualSubmission {
        ManualSubmission {
            numero_laudo: self.laudo.clone(),
            data: self.data.clone(),
            frota: self.frota.clone(),
            parecer: self.parecer.clone(),
            analise: self.analise.clone(),
            conclusao: self.conclusao.clone(),
        }
    }
}
