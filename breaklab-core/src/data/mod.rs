//! Data ingestion and daily grouping

pub mod group;
pub mod ingest;
pub mod inspect;

pub use group::group_by_day;
pub use ingest::{load_candles, read_candles, DataError, LoadedCandles, RowError};
pub use inspect::{preview, preview_file, FeedPreview};
