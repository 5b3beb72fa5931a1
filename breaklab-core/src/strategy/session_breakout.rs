//! Session breakout — trade the first close outside a fixed time-of-day candle.
//!
//! Per day:
//! 1. take the base candle at `base_time`; skip if missing
//! 2. skip if its range is below `min_range_points`
//! 3. take the stop-loss reference candle at `stop_loss_time`; skip if missing
//! 4. after `base + cooldown`, the first close above base high is a Buy,
//!    the first close below base low is a Sell; skip if neither happens
//! 5. enter at that close, stop at the reference low (Buy) / high (Sell)
//! 6. walk the rest of the day: stop touched ends the walk, otherwise track
//!    the best favorable excursion
//! 7. Bad only if stopped with excursion below `good_excursion_points`
//!
//! All comparisons use unrounded prices.

use std::fmt;

use crate::domain::{Bias, Candle, DayGroup, TradeOutcome, TradeResult};

use super::StrategyParams;

/// Why a day produced no trade. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    NoBaseCandle,
    RangeTooNarrow,
    NoStopLossCandle,
    NoBreakout,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoBaseCandle => "no_base_candle",
            SkipReason::RangeTooNarrow => "range_too_narrow",
            SkipReason::NoStopLossCandle => "no_stop_loss_candle",
            SkipReason::NoBreakout => "no_breakout",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the forward walk after entry.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Excursion {
    max_points: f64,
    sl_hit: bool,
}

/// Time-of-day session breakout engine.
#[derive(Debug, Clone, Default)]
pub struct SessionBreakout {
    params: StrategyParams,
}

impl SessionBreakout {
    pub fn new(params: StrategyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &StrategyParams {
        &self.params
    }

    /// Zero or one outcome for a day.
    pub fn evaluate(&self, day: &DayGroup) -> Option<TradeOutcome> {
        self.evaluate_day(day).ok()
    }

    /// Simulate one day, reporting why it was skipped when no trade results.
    pub fn evaluate_day(&self, day: &DayGroup) -> Result<TradeOutcome, SkipReason> {
        let p = &self.params;

        let base = day
            .at_time(p.base_time)
            .ok_or(SkipReason::NoBaseCandle)?;
        if base.range() < p.min_range_points {
            return Err(SkipReason::RangeTooNarrow);
        }

        let sl_ref = day
            .at_time(p.stop_loss_time)
            .ok_or(SkipReason::NoStopLossCandle)?;

        let (breakout, bias) = self
            .find_breakout(day.candles(), base)
            .ok_or(SkipReason::NoBreakout)?;

        let entry_price = breakout.close;
        let stop_loss = match bias {
            Bias::Buy => sl_ref.low,
            Bias::Sell => sl_ref.high,
        };
        let sl_points = (entry_price - stop_loss).abs();

        let after_entry = day
            .candles()
            .iter()
            .filter(|c| c.timestamp > breakout.timestamp);
        let excursion = walk_forward(after_entry, bias, entry_price, stop_loss);

        let result = if excursion.sl_hit && excursion.max_points < p.good_excursion_points {
            TradeResult::Bad
        } else {
            TradeResult::Good
        };

        Ok(TradeOutcome {
            date: day.date(),
            base_high: base.high,
            base_low: base.low,
            base_close: base.close,
            breakout_time: breakout.timestamp,
            entry_price,
            bias,
            stop_loss,
            sl_points,
            max_points: excursion.max_points,
            sl_hit: excursion.sl_hit,
            result,
        })
    }

    /// Evaluate every day in order, keeping the qualifying ones.
    pub fn run(&self, days: &[DayGroup]) -> Vec<TradeOutcome> {
        days.iter().filter_map(|d| self.evaluate(d)).collect()
    }

    /// First candle after the cooldown that closes outside the base range.
    fn find_breakout<'a>(&self, candles: &'a [Candle], base: &Candle) -> Option<(&'a Candle, Bias)> {
        let not_before = base.timestamp + self.params.cooldown();
        candles
            .iter()
            .filter(|c| c.timestamp > not_before)
            .find_map(|c| {
                if c.close > base.high {
                    Some((c, Bias::Buy))
                } else if c.close < base.low {
                    Some((c, Bias::Sell))
                } else {
                    None
                }
            })
    }
}

/// Walk candles after entry until the stop is touched or the day ends.
///
/// Excursion starts at zero, so it is never negative. The candle that
/// touches the stop does not contribute to the excursion.
fn walk_forward<'a>(
    candles: impl Iterator<Item = &'a Candle>,
    bias: Bias,
    entry_price: f64,
    stop_loss: f64,
) -> Excursion {
    let mut max_points = 0.0_f64;

    for c in candles {
        let (stopped, favorable) = match bias {
            Bias::Buy => (c.low <= stop_loss, c.high - entry_price),
            Bias::Sell => (c.high >= stop_loss, entry_price - c.low),
        };
        if stopped {
            return Excursion {
                max_points,
                sl_hit: true,
            };
        }
        max_points = max_points.max(favorable);
    }

    Excursion {
        max_points,
        sl_hit: false,
    }
}
