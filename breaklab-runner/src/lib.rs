//! BreakLab Runner — backtest pipeline, summary statistics, reporting.
//!
//! This crate builds on `breaklab-core` to provide:
//! - Run configuration (TOML)
//! - Single-pass pipeline: load → group by day → evaluate → summarize
//! - Efficiency summary
//! - Console table rendering
//! - Spreadsheet and CSV export

pub mod config;
pub mod export;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::{ConfigError, RunConfig};
pub use export::{build_workbook, export_outcomes_csv, write_spreadsheet, ExportError};
pub use metrics::EfficiencySummary;
pub use report::{render_summary, render_table, NO_TRADES_MESSAGE};
pub use runner::{
    run_backtest, run_backtest_from_candles, write_outputs, BacktestResult, RunError,
    WrittenOutputs,
};
