//! Candle — the fundamental market data unit.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// OHLCV candle for one fixed-duration interval (15 minutes in the gold feed).
///
/// The loader does not enforce `high >= max(open, close)` or
/// `low <= min(open, close)`; downstream logic tolerates bad bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// Trailing column carried through from the feed, unused by the engine.
    pub extra: Option<String>,
}

impl Candle {
    /// Calendar date this candle belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Time-of-day of the candle open.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// High minus low, in price points.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
