// Engine main entry point
mod cli;
mod display;

use anyhow::{Context, Result};
use clap::Parser;
use engine::config::EngineSettings;
use engine::exports;
use engine::services::ReportSession;
use serde::Serialize;
use tracing::{info, Level};

use cli::{Cli, Command, ExportTarget};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for tables and JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let mut settings = EngineSettings::load(cli.config.as_deref()).context("failed to load settings")?;
    cli.apply_overrides(&mut settings);

    let mut session = ReportSession::open(settings, cli.report.as_deref()).context("failed to open report session")?;
    run(&cli, &mut session)
}

fn run(cli: &Cli, session: &mut ReportSession) -> Result<()> {
    let today = chrono::Utc::now().date_naive();
    match &cli.command {
        Command::Summary => {
            let summary = session.summary(today)?;
            emit(cli.json, &summary, || display::render_summary(&summary))
        }
        Command::Replacements => {
            let records = session.replacements();
            emit(cli.json, &records, || {
                display::render_table(&exports::replacements_table(session.records()))
            })
        }
        Command::Life => {
            let windows = session.life_table(today);
            emit(cli.json, &windows, || display::render_table(&exports::life_table(&windows)))
        }
        Command::Counts(args) => {
            let top = args.top.unwrap_or(session.settings().top_units);
            let counts = session.top_units(top);
            emit(cli.json, &counts, || display::render_table(&display::counts_table(&counts)))
        }
        Command::Intervals => {
            let intervals = session.replacement_intervals();
            emit(cli.json, &intervals, || display::render_table(&display::intervals_table(&intervals)))
        }
        Command::Unprocessed => {
            let names = session.unprocessed_documents()?;
            emit(cli.json, &names, || display::render_table(&exports::unprocessed_table(&names)))
        }
        Command::Add(args) => {
            let added = session
                .add_manual(&args.submission())
                .context("manual entry was not saved")?;
            let view = added.view();
            emit(cli.json, &view, || {
                let mut text = format!(
                    "Added {} row(s) for units {} to {}",
                    view.added,
                    view.units.join(", "),
                    view.log_path.display()
                );
                if let Some(report) = view.report_path {
                    text.push_str(&format!("\nReport saved to {}", report.display()));
                }
                for warning in view.warnings {
                    text.push_str(&format!("\nwarning: {}", warning));
                }
                text
            })
        }
        Command::History => {
            let log = session.manual_log();
            if cli.json {
                print_json(&log.read_entries()?)
            } else {
                println!("{}", display::render_table(&log.read_table()?));
                Ok(())
            }
        }
        Command::Export(args) => {
            let out = args.out.as_deref();
            let path = match args.target {
                ExportTarget::Replacements => session.export_replacements(out),
                ExportTarget::Unprocessed => session.export_unprocessed(out),
                ExportTarget::Life => session.export_life_table(today, out),
                ExportTarget::History => session.export_history(out),
            }
            .with_context(|| format!("failed to export {:?}", args.target))?;
            info!(path = %path.display(), "Export finished");
            emit(cli.json, &path, || path.display().to_string())
        }
    }
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        print_json(value)
    } else {
        println!("{}", text());
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("failed to encode JSON")?);
    Ok(())
}
