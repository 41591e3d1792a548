//! `immo`: fixed-asset capitalization from the command line.
//!
//! Reads purchase invoices from CSV, decides which ones are fixed assets to
//! capitalize, and prints their depreciation schedules.

mod output;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use immo_catalog::{Catalog, CatalogError};
use immo_engine::invoice_loader::{parse_amount, parse_date};
use immo_engine::{
    load_invoices_file, AssetEngine, AssetParameters, DepreciationError, DepreciationMethod,
    EngineSettings, LoadError, SettingsError,
};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Depreciation(#[from] DepreciationError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(String),
}

#[derive(Parser)]
#[command(name = "immo")]
#[command(about = "SYSCOHADA fixed-asset capitalization and depreciation")]
#[command(version)]
struct Cli {
    /// Settings file (JSON parameter list)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Catalog override file (JSON), replaces the built-in SYSCOHADA table
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Capitalization floor, overrides the settings file
    #[arg(long, global = true, value_parser = amount_arg)]
    threshold: Option<Decimal>,

    /// Output as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect assets in an invoice CSV (id,date,supplier,description,account,amount)
    Detect {
        invoices: PathBuf,

        /// Print the depreciation schedule of each capitalized invoice
        #[arg(long)]
        schedules: bool,

        /// Print posting proposals along with schedules
        #[arg(long)]
        postings: bool,
    },

    /// Compute the depreciation schedule of one asset
    Schedule {
        /// Catalog category code, e.g. 2442
        #[arg(long)]
        category: String,

        /// Acquisition cost
        #[arg(long, value_parser = amount_arg)]
        cost: Decimal,

        /// In-service date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, value_parser = date_arg)]
        date: NaiveDate,

        /// lineaire or degressif (default from settings)
        #[arg(long, value_parser = method_arg)]
        method: Option<DepreciationMethod>,

        /// Useful life in years (default from the category)
        #[arg(long)]
        life: Option<u32>,

        /// Apply prorata temporis to the first period
        #[arg(long)]
        prorata: bool,

        /// Degressive coefficient (1.25 to 3.5)
        #[arg(long, value_parser = amount_arg)]
        coefficient: Option<Decimal>,

        /// Print posting proposals
        #[arg(long)]
        postings: bool,
    },

    /// Browse the classification catalog
    Catalog {
        /// Accent-insensitive search over labels, content and examples
        #[arg(long)]
        search: Option<String>,

        /// Only categories of this asset class
        #[arg(long)]
        class: Option<String>,

        /// Show one category with its depreciation defaults
        #[arg(long)]
        code: Option<String>,
    },
}

fn amount_arg(raw: &str) -> Result<Decimal, String> {
    parse_amount(raw).ok_or_else(|| format!("invalid amount '{}'", raw))
}

fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date '{}'", raw))
}

fn method_arg(raw: &str) -> Result<DepreciationMethod, String> {
    DepreciationMethod::parse(raw).ok_or_else(|| format!("unknown method '{}' (lineaire, degressif)", raw))
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, CliError> {
    match path {
        Some(p) => {
            let catalog = Catalog::from_json_file(p)?;
            log::info!("loaded {} categories from {}", catalog.len(), p.display());
            Ok(catalog)
        }
        None => Ok(Catalog::syscohada()),
    }
}

fn load_settings(cli: &Cli) -> Result<EngineSettings, CliError> {
    let mut settings = match &cli.settings {
        Some(p) => EngineSettings::from_json_file(p)?,
        None => EngineSettings::default(),
    };
    if let Some(threshold) = cli.threshold {
        if threshold < Decimal::ZERO {
            return Err(CliError::InvalidArgument(format!(
                "capitalization threshold must not be negative, got {}",
                threshold
            )));
        }
        settings.capitalization_threshold = threshold;
    }
    Ok(settings)
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let catalog = Arc::new(load_catalog(cli.catalog.as_deref())?);
    let settings = load_settings(cli)?;

    match &cli.command {
        Commands::Detect {
            invoices,
            schedules,
            postings,
        } => {
            let load_start = Instant::now();
            let invoices = load_invoices_file(invoices)?;
            let load_ms = load_start.elapsed().as_millis();

            let engine = AssetEngine::new(catalog, settings);
            let run_start = Instant::now();
            let outcomes = engine.process_batch(&invoices);
            let run_ms = run_start.elapsed().as_millis();

            if cli.json {
                let report = output::build_detect_json(&engine, &invoices, &outcomes, *postings, run_ms);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_detect(&engine, &invoices, &outcomes, *schedules || *postings, *postings);
                output::print_timing(load_ms, run_ms);
            }
            Ok(())
        }
        Commands::Schedule {
            category,
            cost,
            date,
            method,
            life,
            prorata,
            coefficient,
            postings,
        } => {
            let mut settings = settings;
            if *prorata {
                settings.prorata_temporis = true;
            }
            if coefficient.is_some() {
                settings.degressive_coefficient = *coefficient;
            }
            let engine = AssetEngine::new(catalog, settings);
            let params = AssetParameters {
                category_code: category.clone(),
                acquisition_cost: *cost,
                in_service_date: *date,
                method: method.unwrap_or(engine.settings().default_depreciation_method),
                useful_life: *life,
            };
            let schedule = engine.calculator().calculate(&params)?;
            let proposals = if *postings {
                engine.posting_proposals(&schedule)
            } else {
                Vec::new()
            };

            if cli.json {
                let report = output::ScheduleJson {
                    schedule: &schedule,
                    postings: proposals,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_schedule(&schedule);
                output::print_postings(&proposals);
            }
            Ok(())
        }
        Commands::Catalog {
            search,
            class,
            code,
        } => {
            if let Some(code) = code {
                let classification = catalog.classification_by_code(code).ok_or_else(|| {
                    CliError::InvalidArgument(format!("unknown category code '{}'", code))
                })?;
                let info = catalog.depreciation_info(code);
                if cli.json {
                    let report = output::CategoryJson {
                        classification,
                        depreciation: info.as_ref(),
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    output::print_category(classification, info.as_ref());
                }
                return Ok(());
            }

            let mut entries: Vec<_> = match search {
                Some(query) => catalog.search_classifications(query),
                None => catalog.all_classifications().iter().collect(),
            };
            if let Some(class) = class {
                entries.retain(|c| c.asset_class == *class || c.class_number() == class.as_str());
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                output::print_catalog(&entries);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    #[test]
    fn fixture_settings_load() {
        let settings = EngineSettings::from_json_file(fixture("settings.json")).unwrap();
        assert!(settings.prorata_temporis);
        assert_eq!(settings.degressive_coefficient, Some(Decimal::new(225, 2)));
    }

    #[test]
    fn fixture_invoices_process() {
        let invoices = load_invoices_file(fixture("sample_invoices.csv")).unwrap();
        assert_eq!(invoices.len(), 10);
        let engine = AssetEngine::new(Arc::new(Catalog::syscohada()), EngineSettings::default());
        let outcomes = engine.process_batch(&invoices);
        assert!(outcomes.iter().all(|o| o.is_ok()));
        let capitalized: Vec<&str> = outcomes
            .iter()
            .flatten()
            .filter(|o| o.capitalized)
            .map(|o| o.invoice_id.as_str())
            .collect();
        assert!(capitalized.contains(&"FAC-2024-001"));
        assert!(!capitalized.contains(&"FAC-2024-002"));
    }

    #[test]
    fn schedule_arguments_parse() {
        let cli = Cli::try_parse_from([
            "immo", "schedule", "--category", "2451", "--cost", "10 000", "--date", "20/10/2023",
            "--method", "dégressif", "--prorata", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Schedule {
                cost, date, method, prorata, ..
            } => {
                assert_eq!(cost, Decimal::from(10_000));
                assert_eq!(date, NaiveDate::from_ymd_opt(2023, 10, 20).unwrap());
                assert_eq!(method, Some(DepreciationMethod::Degressive));
                assert!(prorata);
            }
            _ => panic!("expected the schedule command"),
        }
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let cli = Cli::try_parse_from(["immo", "--threshold=-5", "catalog"]).unwrap();
        assert!(matches!(load_settings(&cli), Err(CliError::InvalidArgument(_))));
    }
}
