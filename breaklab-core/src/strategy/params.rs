//! Session breakout parameters.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Named constants for the session breakout strategy.
///
/// `Default` is the production setup: 13:30 base candle, 13:15 stop-loss
/// reference, 15 minute cooldown, 4 point minimum range, 5 point excursion
/// to count a stopped trade as Good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Time-of-day of the candle that defines the breakout range.
    pub base_time: NaiveTime,
    /// Time-of-day of the candle whose low/high is the stop-loss.
    ///
    /// Precedes `base_time` in the production setup.
    pub stop_loss_time: NaiveTime,
    /// Candles at or before `base + cooldown` are not breakout candidates.
    pub cooldown_minutes: i64,
    /// Base ranges narrower than this are not traded.
    pub min_range_points: f64,
    /// A stopped trade with less favorable excursion than this is Bad.
    pub good_excursion_points: f64,
}

impl StrategyParams {
    pub fn cooldown(&self) -> Duration {
        Duration::minutes(self.cooldown_minutes)
    }

    /// Column label prefix for base candle fields, e.g. "13:30".
    pub fn base_label(&self) -> String {
        self.base_time.format("%H:%M").to_string()
    }
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            base_time: hms(13, 30),
            stop_loss_time: hms(13, 15),
            cooldown_minutes: 15,
            min_range_points: 4.0,
            good_excursion_points: 5.0,
        }
    }
}

fn hms(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}
