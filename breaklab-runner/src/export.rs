//! Export — spreadsheet workbook and CSV trade tape.
//!
//! The workbook has a single sheet:
//! - bold header row, one row per outcome
//! - column width `max(header + 2, 15)`
//! - blank separator row, then the efficiency summary block
//!
//! Neither writer accepts an empty outcome list; the pipeline skips export
//! for runs without trades.

use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use breaklab_core::domain::TradeOutcome;
use breaklab_core::strategy::StrategyParams;

use crate::metrics::EfficiencySummary;
use crate::report::{outcome_cells, outcome_headers, Cell};

/// Minimum spreadsheet column width, in characters.
pub const MIN_COLUMN_WIDTH: usize = 15;

/// Errors from the export layer.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no outcomes to export")]
    Empty,

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Spreadsheet ────────────────────────────────────────────────────

/// Build the workbook for a set of outcomes.
pub fn build_workbook(
    outcomes: &[TradeOutcome],
    summary: &EfficiencySummary,
    params: &StrategyParams,
    sheet_title: &str,
) -> Result<Workbook, ExportError> {
    if outcomes.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_title)?;

    let bold = Format::new().set_bold();
    let headers = outcome_headers(params);
    for (col, title) in headers.iter().enumerate() {
        let col = col as ColNum;
        sheet.write_string_with_format(0, col, title, &bold)?;
        sheet.set_column_width(col, column_width(title) as f64)?;
    }

    let mut row: RowNum = 1;
    for o in outcomes {
        for (col, cell) in outcome_cells(o).iter().enumerate() {
            write_cell(sheet, row, col as ColNum, cell)?;
        }
        row += 1;
    }

    // Blank separator row.
    row += 1;
    sheet.write_string(row, 0, "Efficiency Summary")?;
    row += 1;
    sheet.write_string(row, 0, "Average SL Points")?;
    sheet.write_number(row, 1, summary.avg_sl_points)?;
    row += 1;
    sheet.write_string(row, 0, "Total Trades")?;
    sheet.write_number(row, 1, summary.total_trades as f64)?;
    row += 1;
    sheet.write_string(row, 0, "Good Trades")?;
    sheet.write_number(row, 1, summary.good_trades as f64)?;
    row += 1;
    sheet.write_string(row, 0, "Efficiency (%)")?;
    sheet.write_number(row, 1, summary.efficiency_pct)?;

    Ok(workbook)
}

/// Write the workbook to `path`.
pub fn write_spreadsheet(
    path: &Path,
    outcomes: &[TradeOutcome],
    summary: &EfficiencySummary,
    params: &StrategyParams,
    sheet_title: &str,
) -> Result<(), ExportError> {
    let mut workbook = build_workbook(outcomes, summary, params, sheet_title)?;
    workbook.save(path)?;
    Ok(())
}

/// Column width for a header: its length plus padding, at least 15.
pub fn column_width(header: &str) -> usize {
    (header.chars().count() + 2).max(MIN_COLUMN_WIDTH)
}

fn write_cell(sheet: &mut Worksheet, row: RowNum, col: ColNum, cell: &Cell) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(s) => sheet.write_string(row, col, s)?,
        Cell::Number(v) => sheet.write_number(row, col, *v)?,
    };
    Ok(())
}

// ─── CSV trade tape ─────────────────────────────────────────────────

/// Outcomes as comma-delimited text with the same columns as the workbook.
pub fn export_outcomes_csv(
    outcomes: &[TradeOutcome],
    params: &StrategyParams,
) -> Result<String, ExportError> {
    if outcomes.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(outcome_headers(params))?;
    for o in outcomes {
        wtr.write_record(outcome_cells(o).iter().map(Cell::render_exact))?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Write the CSV trade tape to `path`.
pub fn write_outcomes_csv(
    path: &Path,
    outcomes: &[TradeOutcome],
    params: &StrategyParams,
) -> Result<(), ExportError> {
    let csv = export_outcomes_csv(outcomes, params)?;
    std::fs::write(path, csv)?;
    Ok(())
}
