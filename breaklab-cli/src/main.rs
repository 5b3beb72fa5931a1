//! BreakLab CLI — session breakout backtest over a 15-minute gold feed.
//!
//! Commands:
//! - `run` — backtest the feed, print the outcome table, write the spreadsheet
//! - `inspect` — print a feed's column names and first data row

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use breaklab_core::data::preview_file;
use breaklab_core::strategy::StrategyParams;
use breaklab_runner::{render_summary, run_backtest, write_outputs, RunConfig};

#[derive(Parser)]
#[command(
    name = "breaklab",
    about = "BreakLab CLI — time-of-day breakout backtester for XAU/USD 15-minute candles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backtest a tab-delimited candle feed and export the results.
    Run {
        /// Path to a TOML run config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Candle feed. Overrides the config file.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Spreadsheet output path. Overrides the config file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write a CSV trade tape to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the column names and first data row of a feed.
    Inspect {
        /// Candle feed. Defaults to xau_usd_m15.csv.
        #[arg(default_value = "xau_usd_m15.csv")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            input,
            output,
            csv,
        } => run_cmd(config, input, output, csv),
        Commands::Inspect { file } => inspect_cmd(file),
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_file(&path)?,
        None => RunConfig::default(),
    };
    if let Some(input) = input {
        config.input = input;
    }
    if let Some(output) = output {
        config.output = output;
    }
    if csv.is_some() {
        config.csv_output = csv;
    }
    config.validate()?;

    let params = StrategyParams::default();
    let result = run_backtest(&config.input, &params)
        .with_context(|| format!("backtest failed for {}", config.input.display()))?;

    println!("{}", result.table());

    let written = write_outputs(&result, &config).context("failed to write results")?;
    if let Some(path) = written.spreadsheet {
        println!("\n{}", render_summary(&result.summary));
        println!("\nExcel file saved as: {}", path.display());
    }
    if let Some(path) = written.csv {
        println!("Trade tape saved as: {}", path.display());
    }

    Ok(())
}

fn inspect_cmd(file: PathBuf) -> Result<()> {
    let preview =
        preview_file(&file).with_context(|| format!("failed to inspect {}", file.display()))?;
    println!("{}", preview.render());
    Ok(())
}
