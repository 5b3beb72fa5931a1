//! Console report — outcome table and summary lines.
//!
//! Column layout is shared with the spreadsheet and CSV exports so the three
//! outputs never disagree on order or labels.

use tabled::builder::Builder;
use tabled::settings::Style;

use breaklab_core::domain::TradeOutcome;
use breaklab_core::strategy::StrategyParams;

use crate::metrics::EfficiencySummary;

/// Printed in place of the table when no day qualified.
pub const NO_TRADES_MESSAGE: &str = "No valid breakout trades found.";

/// Breakout time column format.
pub const BREAKOUT_TIME_FORMAT: &str = "%H:%M:%S";

/// Significant digits shown for numbers in the console table.
const SIGNIFICANT_DIGITS: usize = 6;

/// Column headers in output order. Base candle columns carry the base time,
/// e.g. "13:30 High".
pub fn outcome_headers(params: &StrategyParams) -> Vec<String> {
    let base = params.base_label();
    vec![
        "Date".to_string(),
        format!("{base} High"),
        format!("{base} Low"),
        format!("{base} Close"),
        "Breakout Time".to_string(),
        "Breakout Close (Entry)".to_string(),
        "Bias".to_string(),
        "SL".to_string(),
        "SL Points".to_string(),
        "Max Points".to_string(),
        "SL Hit".to_string(),
        "Trade Result".to_string(),
    ]
}

/// One cell of an outcome row, typed so writers can keep numbers numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    /// Console form: numbers via [`format_number`].
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => format_number(*v),
        }
    }

    /// Shortest round-tripping decimal ("1905.0"), used by the CSV tape.
    pub fn render_exact(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => format!("{v:?}"),
        }
    }
}

/// Cells for one outcome, in [`outcome_headers`] order.
pub fn outcome_cells(o: &TradeOutcome) -> Vec<Cell> {
    vec![
        Cell::Text(o.date.format("%Y-%m-%d").to_string()),
        Cell::Number(o.base_high),
        Cell::Number(o.base_low),
        Cell::Number(o.base_close),
        Cell::Text(o.breakout_time.format(BREAKOUT_TIME_FORMAT).to_string()),
        Cell::Number(o.entry_price),
        Cell::Text(o.bias.to_string()),
        Cell::Number(o.stop_loss),
        Cell::Number(o.sl_points),
        Cell::Number(o.max_points_rounded()),
        Cell::Text(o.sl_hit_label().to_string()),
        Cell::Text(o.result.to_string()),
    ]
}

/// General number format: six significant digits, trailing zeros dropped,
/// exponent form below `1e-4` or from `1e6` up.
///
/// `1905.0` prints as "1905", `1234.5678` as "1234.57", `1234567.0` as
/// "1.23457e+06".
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Exponent after rounding to the shown precision, so 999999.5 counts as 1e6.
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{v:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Render outcomes as an ASCII table, or [`NO_TRADES_MESSAGE`] when empty.
pub fn render_table(outcomes: &[TradeOutcome], params: &StrategyParams) -> String {
    if outcomes.is_empty() {
        return NO_TRADES_MESSAGE.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(outcome_headers(params));
    for o in outcomes {
        builder.push_record(outcome_cells(o).iter().map(Cell::render));
    }

    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

/// Summary lines printed under the table.
pub fn render_summary(summary: &EfficiencySummary) -> String {
    format!(
        "Efficiency Summary\n\
         Average SL Points: {}\n\
         Total Trades: {}\n\
         Good Trades: {}\n\
         Efficiency (%): {}",
        format_number(summary.avg_sl_points),
        summary.total_trades,
        summary.good_trades,
        format_number(summary.efficiency_pct),
    )
}
