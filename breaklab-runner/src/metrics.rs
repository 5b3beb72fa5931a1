//! Efficiency summary — pure functions over the outcome list.

use serde::{Deserialize, Serialize};

use breaklab_core::domain::{round2, TradeOutcome};

/// Aggregate statistics for a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    pub total_trades: usize,
    pub good_trades: usize,
    /// Good / total × 100, rounded to 2 decimals. 0.0 with no trades.
    pub efficiency_pct: f64,
    /// Mean stop-loss distance, rounded to 2 decimals. 0.0 with no trades.
    pub avg_sl_points: f64,
}

impl EfficiencySummary {
    pub fn compute(outcomes: &[TradeOutcome]) -> Self {
        Self {
            total_trades: outcomes.len(),
            good_trades: good_trades(outcomes),
            efficiency_pct: efficiency_pct(outcomes),
            avg_sl_points: avg_sl_points(outcomes),
        }
    }
}

pub fn good_trades(outcomes: &[TradeOutcome]) -> usize {
    outcomes.iter().filter(|o| o.is_good()).count()
}

pub fn efficiency_pct(outcomes: &[TradeOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    round2(good_trades(outcomes) as f64 / outcomes.len() as f64 * 100.0)
}

pub fn avg_sl_points(outcomes: &[TradeOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let total: f64 = outcomes.iter().map(|o| o.sl_points).sum();
    round2(total / outcomes.len() as f64)
}
