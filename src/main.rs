//! Command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use i18n_csv2json::config::{
    ConfigManager,
    SettingsOverrides,
};
use i18n_csv2json::report::LanguageStatus;
use i18n_csv2json::{
    Csv2JsonError,
    RunOptions,
    RunReport,
    run,
};
use tracing_subscriber::EnvFilter;

/// Merge a CSV translation table into per-language JSON files shaped like a template.
#[derive(Debug, Parser)]
#[command(name = "i18n-csv2json", version, about)]
struct Cli {
    /// CSV translation table
    #[arg(short = 'i', long = "input", visible_alias = "csv")]
    csv: Option<PathBuf>,

    /// Template JSON in the source language
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Directory receiving `{lang}.json`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only merge this top-level key of the template
    #[arg(short, long = "group")]
    group_key: Option<String>,

    /// Trim whitespace around CSV cells
    #[arg(long)]
    trim: bool,

    /// Language codes in CSV column order, comma separated
    #[arg(short, long, value_delimiter = ',')]
    lang_codes: Option<Vec<String>>,

    /// Fill untranslated leaves with the template text
    #[arg(long)]
    use_template_as_default: bool,

    /// Directory containing `.csv2json.json`
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            csv: self.csv.clone(),
            template: self.template.clone(),
            output_dir: self.output.clone(),
            group_key: self.group_key.clone(),
            trim: self.trim,
            lang_codes: self.lang_codes.clone(),
            use_template_as_default: self.use_template_as_default,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(&cli).await {
        Ok(report) => {
            print_report(&report, cli.json);
            if report.languages.iter().any(|l| matches!(l.status, LanguageStatus::Failed(_))) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: &Cli) -> Result<RunReport, Csv2JsonError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(&cli.config_dir)?;
    if let Some(file) = config_manager.source_file() {
        tracing::info!(path = %file.display(), "Using configuration file");
    }
    config_manager.apply_overrides(cli.overrides())?;

    let settings = config_manager.get_settings();
    let csv = settings.csv.clone().ok_or_else(|| {
        Csv2JsonError::Configuration("no CSV input given (use --input or \"csv\" in the config file)".to_string())
    })?;

    run(&RunOptions::from_settings(settings, csv)).await
}

#[allow(clippy::print_stdout)]
fn print_report(report: &RunReport, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("Failed to serialize report: {e}"),
        }
        return;
    }

    for language in &report.languages {
        let status = match &language.status {
            LanguageStatus::Written => "written".to_string(),
            LanguageStatus::Unchanged => "unchanged".to_string(),
            LanguageStatus::SkippedSelfOverwrite => "skipped (template)".to_string(),
            LanguageStatus::Failed(message) => format!("failed: {message}"),
        };
        println!(
            "{}: {status} (updated {}, unchanged {}, missing {})",
            language.lang,
            language.stats.updated,
            language.stats.unchanged,
            language.stats.missing.len()
        );
    }

    let totals = &report.summary.totals;
    println!(
        "{} records, {} languages written; updated {}, unchanged {}, missing {}",
        report.record_count,
        totals.languages_written_count,
        totals.updated,
        totals.unchanged,
        totals.missing
    );
}
