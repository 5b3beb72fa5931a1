//! Domain types for BreakLab

pub mod candle;
pub mod day;
pub mod outcome;

pub use candle::Candle;
pub use day::DayGroup;
pub use outcome::{round2, Bias, TradeOutcome, TradeResult};
