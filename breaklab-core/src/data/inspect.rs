//! Feed preview: header columns plus the first data row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use super::ingest::DataError;

/// First two rows of a tab-delimited feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedPreview {
    pub columns: Vec<String>,
    pub first_row: Option<Vec<String>>,
}

impl FeedPreview {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Human-readable preview, one item per line.
    ///
    /// ```text
    /// Column Names:
    /// Time | Open | High
    /// ------------------
    /// 2024-03-04 13:30:00 | 1 | 2
    /// ```
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "The CSV file is empty.".to_string();
        }

        let header = self.columns.join(" | ");
        let mut out = String::new();
        out.push_str("Column Names:\n");
        out.push_str(&header);
        out.push('\n');
        out.push_str(&"-".repeat(header.chars().count()));
        out.push('\n');
        match &self.first_row {
            Some(row) => out.push_str(&row.join(" | ")),
            None => out.push_str("No data rows found in the CSV."),
        }
        out
    }
}

/// Preview a feed on disk.
pub fn preview_file(path: &Path) -> Result<FeedPreview, DataError> {
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.display().to_string(),
        source,
    })?;
    preview(file)
}

/// Read the header and first data row from a reader.
pub fn preview<R: Read>(reader: R) -> Result<FeedPreview, DataError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.records();
    let columns = match records.next() {
        Some(r) => r?.iter().map(str::to_string).collect(),
        None => return Ok(FeedPreview::default()),
    };
    let first_row = records
        .next()
        .transpose()?
        .map(|r| r.iter().map(str::to_string).collect());

    Ok(FeedPreview { columns, first_row })
}
