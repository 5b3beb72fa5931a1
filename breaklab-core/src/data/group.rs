//! Daily grouping — partition a candle feed into calendar days.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::domain::{Candle, DayGroup};

/// Group candles by calendar date.
///
/// Input order is arbitrary. Returns one [`DayGroup`] per distinct date, in
/// the order each date first appears in the input, each sorted ascending by
/// timestamp. Every input candle lands in exactly one group; duplicates are
/// kept.
pub fn group_by_day(candles: Vec<Candle>) -> Vec<DayGroup> {
    let mut by_date: IndexMap<NaiveDate, Vec<Candle>> = IndexMap::new();
    for candle in candles {
        by_date.entry(candle.date()).or_default().push(candle);
    }

    by_date
        .into_iter()
        .map(|(date, day)| DayGroup::new(date, day))
        .collect()
}
