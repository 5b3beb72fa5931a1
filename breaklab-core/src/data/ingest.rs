//! Tab-delimited candle ingestion.
//!
//! The feed is a header row followed by one row per 15-minute candle:
//! `timestamp  open  high  low  close  volume  [extra]`, tab separated,
//! timestamp formatted `YYYY-MM-DD HH:MM:SS`.
//!
//! Row policy:
//! - the first row is always consumed as the header
//! - rows with fewer than six fields, or whose first field reads "time"
//!   (any case), are dropped silently
//! - rows that fail to parse are dropped with a warning and counted
//!
//! Only I/O failures are fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::domain::Candle;

/// Timestamp layout of the first column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum number of fields for a data row.
pub const MIN_FIELDS: usize = 6;

/// Errors from the ingestion layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] csv::Error),
}

/// Why a single row could not be turned into a candle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    #[error("invalid {field} '{value}'")]
    Number { field: &'static str, value: String },
}

/// Candles parsed from a feed, in file order.
#[derive(Debug, Clone, Default)]
pub struct LoadedCandles {
    pub candles: Vec<Candle>,
    /// Rows dropped because a field failed to parse.
    pub skipped_rows: usize,
}

/// Load candles from a tab-delimited file on disk.
pub fn load_candles(path: &Path) -> Result<LoadedCandles, DataError> {
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let loaded = read_candles(file)?;
    tracing::info!(
        path = %path.display(),
        candles = loaded.candles.len(),
        skipped = loaded.skipped_rows,
        "loaded candle feed"
    );
    Ok(loaded)
}

/// Parse candles from any reader carrying the tab-delimited feed.
pub fn read_candles<R: Read>(reader: R) -> Result<LoadedCandles, DataError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut loaded = LoadedCandles::default();
    let mut records = rdr.records();

    // Header row, whatever it contains.
    if let Some(header) = records.next() {
        header?;
    }

    for record in records {
        let record = match record {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(DataError::Read(e)),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable row");
                loaded.skipped_rows += 1;
                continue;
            }
        };

        if is_ignorable(&record) {
            continue;
        }

        match parse_record(&record) {
            Ok(candle) => loaded.candles.push(candle),
            Err(e) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                tracing::warn!(line, error = %e, "skipping row");
                loaded.skipped_rows += 1;
            }
        }
    }

    Ok(loaded)
}

/// Short rows and repeated header rows.
fn is_ignorable(record: &StringRecord) -> bool {
    record.len() < MIN_FIELDS
        || record
            .get(0)
            .is_some_and(|first| first.eq_ignore_ascii_case("time"))
}

/// Parse one data row. Expects at least [`MIN_FIELDS`] fields.
pub fn parse_record(record: &StringRecord) -> Result<Candle, RowError> {
    let field = |i: usize| record.get(i).unwrap_or("");

    let raw_ts = field(0);
    let timestamp = NaiveDateTime::parse_from_str(raw_ts, TIMESTAMP_FORMAT).map_err(|e| {
        RowError::Timestamp {
            value: raw_ts.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(Candle {
        timestamp,
        open: parse_price("open", field(1))?,
        high: parse_price("high", field(2))?,
        low: parse_price("low", field(3))?,
        close: parse_price("close", field(4))?,
        volume: field(5).parse().map_err(|_| RowError::Number {
            field: "volume",
            value: field(5).to_string(),
        })?,
        extra: record.get(6).map(str::to_string),
    })
}

fn parse_price(field: &'static str, value: &str) -> Result<f64, RowError> {
    value.parse().map_err(|_| RowError::Number {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = "Time\tOpen\tHigh\tLow\tClose\tVolume\tOther\n";

    fn read(body: &str) -> LoadedCandles {
        read_candles(format!("{HEADER}{body}").as_bytes()).unwrap()
    }

    #[test]
    fn parses_well_formed_rows() {
        let loaded = read(
            "2024-03-04 13:30:00\t2085.1\t2091.4\t2083.75\t2090.05\t4210\n\
             2024-03-04 13:45:00\t2090.05\t2092.0\t2088.5\t2091.3\t3900\tx\n",
        );
        assert_eq!(loaded.candles.len(), 2);
        assert_eq!(loaded.skipped_rows, 0);

        let first = &loaded.candles[0];
        assert_eq!(
            first.timestamp,
            NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap()
        );
        assert_eq!(first.high, 2091.4);
        assert_eq!(first.volume, 4210);
        assert_eq!(first.extra, None);
        assert_eq!(loaded.candles[1].extra.as_deref(), Some("x"));
    }

    #[test]
    fn drops_short_rows_without_counting() {
        let loaded = read(
            "2024-03-04 13:30:00\t1\t2\t0.5\t1.5\n\
             2024-03-04 13:45:00\t1\t2\t0.5\t1.5\t10\n",
        );
        assert_eq!(loaded.candles.len(), 1);
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn drops_repeated_header_rows() {
        let loaded = read(
            "TIME\tOpen\tHigh\tLow\tClose\tVolume\n\
             2024-03-04 13:45:00\t1\t2\t0.5\t1.5\t10\n",
        );
        assert_eq!(loaded.candles.len(), 1);
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn counts_malformed_rows() {
        let loaded = read(
            "2024-03-04 13:30\t1\t2\t0.5\t1.5\t10\n\
             2024-03-04 13:45:00\tabc\t2\t0.5\t1.5\t10\n\
             2024-03-04 14:00:00\t1\t2\t0.5\t1.5\t10.5\n\
             2024-03-04 14:15:00\t1\t2\t0.5\t1.5\t10\n",
        );
        assert_eq!(loaded.candles.len(), 1);
        assert_eq!(loaded.skipped_rows, 3);
    }

    #[test]
    fn first_row_is_always_header() {
        // A data-looking first row is still consumed as the header.
        let loaded = read_candles(
            "2024-03-04 13:30:00\t1\t2\t0.5\t1.5\t10\n\
             2024-03-04 13:45:00\t1\t2\t0.5\t1.5\t10\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(loaded.candles.len(), 1);
    }

    #[test]
    fn tolerates_padding_whitespace() {
        let loaded = read(" 2024-03-04 13:30:00 \t 1.5 \t2\t1\t1.5\t 7 \n");
        assert_eq!(loaded.candles.len(), 1);
        assert_eq!(loaded.candles[0].open, 1.5);
        assert_eq!(loaded.candles[0].volume, 7);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let loaded = read_candles("".as_bytes()).unwrap();
        assert!(loaded.candles.is_empty());
        assert_eq!(loaded.skipped_rows, 0);
    }

    #[test]
    fn parse_record_reports_field() {
        let record = StringRecord::from(vec![
            "2024-03-04 13:30:00",
            "1",
            "2",
            "low?",
            "1.5",
            "10",
        ]);
        let err = parse_record(&record).unwrap_err();
        assert_eq!(
            err,
            RowError::Number {
                field: "low",
                value: "low?".into()
            }
        );
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_candles(Path::new("/nonexistent/xau_usd_m15.csv")).unwrap_err();
        assert!(matches!(err, DataError::Open { .. }));
    }
}
