//! Property tests for grouping and engine invariants.
//!
//! Uses proptest to verify:
//! 1. Grouping — every candle lands in exactly one day, each day is time-sorted,
//!    days keep first-appearance order
//! 2. Outcome consistency — classification matches its inputs
//! 3. Determinism — evaluating the same day twice gives the same outcome

use breaklab_core::data::group_by_day;
use breaklab_core::domain::{Bias, Candle, DayGroup, TradeResult};
use breaklab_core::strategy::SessionBreakout;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

/// A candle somewhere in a 5-day window, on the 15-minute grid.
fn arb_candle() -> impl Strategy<Value = Candle> {
    (0u32..5, 0i64..96, 1800.0..2000.0_f64, 0.0..15.0_f64, 0.0..15.0_f64).prop_map(
        |(day, slot, mid, up, down)| {
            let start = NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let timestamp = start + Duration::days(day as i64) + Duration::minutes(slot * 15);
            let mid = (mid * 100.0).round() / 100.0;
            Candle {
                timestamp,
                open: mid,
                high: mid + up,
                low: mid - down,
                close: mid + (up - down) / 2.0,
                volume: 100,
                extra: None,
            }
        },
    )
}

/// A full session day (every 15-minute slot) with random prices.
fn arb_full_day() -> impl Strategy<Value = DayGroup> {
    prop::collection::vec((1880.0..1920.0_f64, 0.0..12.0_f64, 0.0..12.0_f64), 96).prop_map(
        |prices| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
            let start = date.and_hms_opt(0, 0, 0).unwrap();
            let candles = prices
                .into_iter()
                .enumerate()
                .map(|(i, (close, up, down))| Candle {
                    timestamp: start + Duration::minutes(i as i64 * 15),
                    open: close,
                    high: close + up,
                    low: close - down,
                    close,
                    volume: 1,
                    extra: None,
                })
                .collect();
            DayGroup::new(date, candles)
        },
    )
}

// ── 1. Grouping ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn grouping_partitions_and_sorts(candles in prop::collection::vec(arb_candle(), 0..200)) {
        let total = candles.len();
        let days = group_by_day(candles.clone());

        let grouped: usize = days.iter().map(|d| d.candles().len()).sum();
        prop_assert_eq!(grouped, total);

        for d in &days {
            prop_assert!(d.candles().iter().all(|c| c.date() == d.date()));
            prop_assert!(d.candles().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        }

        // Distinct dates, in the order each first appears in the input.
        let mut first_seen: Vec<NaiveDate> = Vec::new();
        for c in &candles {
            if !first_seen.contains(&c.date()) {
                first_seen.push(c.date());
            }
        }
        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date()).collect();
        prop_assert_eq!(dates, first_seen);

        // Every input candle is present.
        for c in &candles {
            let d = days.iter().find(|d| d.date() == c.date());
            prop_assert!(d.is_some());
            prop_assert!(d.unwrap().candles().contains(c));
        }
    }
}

// ── 2. Outcome consistency ───────────────────────────────────────────

proptest! {
    #[test]
    fn outcome_fields_are_consistent(day in arb_full_day()) {
        let engine = SessionBreakout::default();
        let params = engine.params().clone();

        if let Some(o) = engine.evaluate(&day) {
            let base = day.at_time(params.base_time).unwrap();
            let sl_ref = day.at_time(params.stop_loss_time).unwrap();

            prop_assert!(base.high - base.low >= params.min_range_points);
            prop_assert!(o.breakout_time > base.timestamp + params.cooldown());
            prop_assert!(o.sl_points >= 0.0);
            prop_assert!((o.sl_points - (o.entry_price - o.stop_loss).abs()).abs() < 1e-9);
            prop_assert!(o.max_points >= 0.0);

            match o.bias {
                Bias::Buy => {
                    prop_assert!(o.entry_price > o.base_high);
                    prop_assert_eq!(o.stop_loss, sl_ref.low);
                }
                Bias::Sell => {
                    prop_assert!(o.entry_price < o.base_low);
                    prop_assert_eq!(o.stop_loss, sl_ref.high);
                }
            }

            let expect_bad = o.sl_hit && o.max_points < params.good_excursion_points;
            prop_assert_eq!(o.result == TradeResult::Bad, expect_bad);
        }
    }

    #[test]
    fn evaluation_is_deterministic(day in arb_full_day()) {
        let engine = SessionBreakout::default();
        prop_assert_eq!(engine.evaluate_day(&day), engine.evaluate_day(&day));
    }
}
