//! Strategy engine and its parameters

pub mod params;
pub mod session_breakout;

pub use params::StrategyParams;
pub use session_breakout::{SessionBreakout, SkipReason};
