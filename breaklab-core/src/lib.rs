//! BreakLab Core — domain types, candle ingestion, daily grouping, breakout engine.
//!
//! This crate contains the analytical heart of the backtester:
//! - Domain types (candles, day groups, trade outcomes)
//! - Tab-delimited feed loader with per-row recovery
//! - Daily grouper that establishes time-ascending order per day
//! - Session breakout engine (base candle, breakout scan, stop-loss walk)

pub mod data;
pub mod domain;
pub mod strategy;
