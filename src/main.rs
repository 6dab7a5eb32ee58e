use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mcerr::analysis::Analyzer;
use mcerr::blocking::blocking_profile;
use mcerr::config::AnalysisConfig;
use mcerr::data::{read_sample, save_report};
use mcerr::stats::autocorrelation_profile;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Sample file (`.msgpack` or whitespace separated text).
    #[arg(long)]
    data_file: PathBuf,

    /// Analysis configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Analyze {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    Autocorr {
        #[arg(long)]
        max_lag: Option<usize>,
    },

    Blocking {
        #[arg(long)]
        max_block_size: Option<usize>,
    },
}

#[derive(Serialize)]
struct AutocorrOutput {
    autocorrelation_time: f64,
    coefs: Vec<f64>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = match &args.config {
        Some(file) => AnalysisConfig::from_file(file).context("failed to construct cfg")?,
        None => AnalysisConfig::default(),
    };
    log::info!("{cfg:#?}");

    let sample = read_sample(&args.data_file).context("failed to read sample")?;

    match args.command {
        Command::Analyze { output } => {
            let report = Analyzer::new(cfg)
                .analyze(&sample)
                .context("failed to analyze sample")?;
            print_toml(&report)?;
            if let Some(output) = output {
                save_report(&output, &report).context("failed to save report")?;
                log::info!("saved {output:?}");
            }
        }
        Command::Autocorr { max_lag } => {
            let profile = autocorrelation_profile(&sample)
                .context("failed to compute autocorrelation")?;
            let n_coefs = max_lag.map_or(profile.len(), |max_lag| max_lag.saturating_add(1));
            let output = AutocorrOutput {
                autocorrelation_time: profile.autocorrelation_time(),
                coefs: profile.coefs().iter().take(n_coefs).copied().collect(),
            };
            print_toml(&output)?;
        }
        Command::Blocking { max_block_size } => {
            let max_block_size = max_block_size.unwrap_or(cfg.blocking.max_block_size);
            let profile = blocking_profile(&sample, max_block_size)
                .context("failed to compute blocking profile")?;
            print_toml(&profile)?;
        }
    }

    Ok(())
}

fn print_toml<T: Serialize>(value: &T) -> Result<()> {
    let contents = toml::to_string_pretty(value).context("failed to serialize output")?;
    print!("{contents}");
    Ok(())
}
