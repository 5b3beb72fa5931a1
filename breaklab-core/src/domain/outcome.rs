//! TradeOutcome — the result of simulating one day's breakout trade.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction, set by which side of the base range the breakout closed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Buy,
    Sell,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Buy => "Buy",
            Bias::Sell => "Sell",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative classification of a simulated trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeResult {
    Good,
    Bad,
}

impl TradeResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeResult::Good => "Good",
            TradeResult::Bad => "Bad",
        }
    }
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One qualifying day's simulated breakout trade.
///
/// Only built when the day has a base candle, a stop-loss reference candle
/// and a breakout. `max_points` is kept unrounded; use
/// [`TradeOutcome::max_points_rounded`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub date: NaiveDate,
    pub base_high: f64,
    pub base_low: f64,
    pub base_close: f64,
    pub breakout_time: NaiveDateTime,
    pub entry_price: f64,
    pub bias: Bias,
    pub stop_loss: f64,
    pub sl_points: f64,
    pub max_points: f64,
    pub sl_hit: bool,
    pub result: TradeResult,
}

impl TradeOutcome {
    /// Maximum favorable excursion rounded to 2 decimals.
    pub fn max_points_rounded(&self) -> f64 {
        round2(self.max_points)
    }

    /// "Yes" / "No" label for the stop-loss flag.
    pub fn sl_hit_label(&self) -> &'static str {
        if self.sl_hit {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn is_good(&self) -> bool {
        self.result == TradeResult::Good
    }
}

/// Round to 2 decimal places, exact halves going to the even cent.
///
/// `3.125` becomes `3.12` and `3.135` becomes `3.14`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(Bias::Buy.to_string(), "Buy");
        assert_eq!(Bias::Sell.to_string(), "Sell");
        assert_eq!(TradeResult::Good.to_string(), "Good");
        assert_eq!(TradeResult::Bad.to_string(), "Bad");
    }

    #[test]
    fn round2_rounds_to_cents() {
        assert_eq!(round2(7.004), 7.0);
        assert_eq!(round2(7.006), 7.01);
        assert_eq!(round2(-3.333), -3.33);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn round2_ties_go_to_even() {
        assert_eq!(round2(0.625), 0.62);
        assert_eq!(round2(3.125), 3.12);
        assert_eq!(round2(7.125), 7.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.625), -0.62);
    }

    #[test]
    fn outcome_serialization_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let outcome = TradeOutcome {
            date,
            base_high: 1900.0,
            base_low: 1890.0,
            base_close: 1895.5,
            breakout_time: date.and_hms_opt(14, 0, 0).unwrap(),
            entry_price: 1905.0,
            bias: Bias::Buy,
            stop_loss: 1885.0,
            sl_points: 20.0,
            max_points: 7.004,
            sl_hit: true,
            result: TradeResult::Good,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let deser: TradeOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, outcome);
        assert_eq!(deser.max_points_rounded(), 7.0);
        assert_eq!(deser.sl_hit_label(), "Yes");
    }
}
