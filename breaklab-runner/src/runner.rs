//! Backtest runner — wires loader, grouper, engine, and summary.
//!
//! Two entry points:
//! - `run_backtest()`: loads the feed from disk, then runs. Used by CLI.
//! - `run_backtest_from_candles()`: takes pre-loaded candles, no I/O.
//!
//! Output (table, spreadsheet, CSV) is handled by `write_outputs()` so that
//! library callers can run the analysis without touching the filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use breaklab_core::data::{group_by_day, load_candles, DataError};
use breaklab_core::domain::{Candle, TradeOutcome};
use breaklab_core::strategy::{SessionBreakout, SkipReason, StrategyParams};

use crate::config::RunConfig;
use crate::export::{write_outcomes_csv, write_spreadsheet, ExportError};
use crate::metrics::EfficiencySummary;
use crate::report::render_table;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestResult {
    pub params: StrategyParams,
    pub outcomes: Vec<TradeOutcome>,
    pub summary: EfficiencySummary,
    pub candle_count: usize,
    pub day_count: usize,
    /// Feed rows dropped for parse errors.
    pub skipped_rows: usize,
    /// Days without a trade, by reason.
    pub skipped_days: BTreeMap<String, usize>,
}

impl BacktestResult {
    pub fn has_trades(&self) -> bool {
        !self.outcomes.is_empty()
    }

    /// Console table (or the no-trades message).
    pub fn table(&self) -> String {
        render_table(&self.outcomes, &self.params)
    }
}

/// Files written by [`write_outputs`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrittenOutputs {
    pub spreadsheet: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

/// Load the feed at `input` and run the strategy over it.
pub fn run_backtest(input: &Path, params: &StrategyParams) -> Result<BacktestResult, RunError> {
    let loaded = load_candles(input)?;
    let mut result = run_backtest_from_candles(loaded.candles, params);
    result.skipped_rows = loaded.skipped_rows;
    Ok(result)
}

/// Run the strategy over pre-loaded candles — no I/O.
pub fn run_backtest_from_candles(candles: Vec<Candle>, params: &StrategyParams) -> BacktestResult {
    let candle_count = candles.len();
    let days = group_by_day(candles);
    let engine = SessionBreakout::new(params.clone());

    let mut outcomes = Vec::new();
    let mut tally: BTreeMap<SkipReason, usize> = BTreeMap::new();
    for day in &days {
        match engine.evaluate_day(day) {
            Ok(outcome) => outcomes.push(outcome),
            Err(reason) => {
                tracing::debug!(date = %day.date(), %reason, "day skipped");
                *tally.entry(reason).or_default() += 1;
            }
        }
    }

    let summary = EfficiencySummary::compute(&outcomes);
    tracing::info!(
        days = days.len(),
        trades = summary.total_trades,
        good = summary.good_trades,
        efficiency_pct = summary.efficiency_pct,
        "backtest complete"
    );

    BacktestResult {
        params: params.clone(),
        outcomes,
        summary,
        candle_count,
        day_count: days.len(),
        skipped_rows: 0,
        skipped_days: tally
            .into_iter()
            .map(|(reason, n)| (reason.to_string(), n))
            .collect(),
    }
}

/// Write the spreadsheet (and CSV tape, if configured).
///
/// A run without trades writes nothing: it returns an empty
/// [`WrittenOutputs`] and logs a warning.
pub fn write_outputs(result: &BacktestResult, config: &RunConfig) -> Result<WrittenOutputs, RunError> {
    if !result.has_trades() {
        tracing::warn!(
            output = %config.output.display(),
            "no trades; spreadsheet not written"
        );
        return Ok(WrittenOutputs::default());
    }

    write_spreadsheet(
        &config.output,
        &result.outcomes,
        &result.summary,
        &result.params,
        &config.sheet_title,
    )?;
    tracing::info!(path = %config.output.display(), "spreadsheet written");

    let csv = match &config.csv_output {
        Some(path) => {
            write_outcomes_csv(path, &result.outcomes, &result.params)?;
            tracing::info!(path = %path.display(), "trade tape written");
            Some(path.clone())
        }
        None => None,
    };

    Ok(WrittenOutputs {
        spreadsheet: Some(config.output.clone()),
        csv,
    })
}
