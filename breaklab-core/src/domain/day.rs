//! DayGroup — one calendar day of candles, time-ascending.

use chrono::{NaiveDate, NaiveTime};

use super::Candle;

/// Candles sharing a calendar date, sorted ascending by timestamp.
///
/// The ordering is established on construction and cannot be broken
/// afterwards: the engine's "first breakout" and "first stop touch" scans
/// rely on it. Identical timestamps are kept in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    date: NaiveDate,
    candles: Vec<Candle>,
}

impl DayGroup {
    /// Build a group, sorting the candles by timestamp (stable).
    ///
    /// Candles whose date differs from `date` are accepted as given; the
    /// grouper never produces them.
    pub fn new(date: NaiveDate, mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        Self { date, candles }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// First candle whose time-of-day equals `time`.
    pub fn at_time(&self, time: NaiveTime) -> Option<&Candle> {
        self.candles.iter().find(|c| c.time() == time)
    }
}
