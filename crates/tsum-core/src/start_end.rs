//! Timecard layout: one row per shift with start/end timestamps.
//!
//! | col 1 | col 3 | col 4 | col 6 |
//! |-------|-------|-------|-------|
//! | name  | start | end   | hours |
//!
//! Rows holding a `TOTAL` marker in any cell are subtotals and are skipped.

use crate::cell::{Cell, Grid, Row, parse_hours, parse_timestamp};
use crate::entry::WorkEntry;
use crate::error::{CellError, Error, Result};
use crate::layout::data_rows;

pub const NAME_COLUMN: usize = 1;
pub const START_COLUMN: usize = 3;
pub const END_COLUMN: usize = 4;
pub const HOURS_COLUMN: usize = 6;

const TOTAL_MARKER: &str = "TOTAL";

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

pub fn parse(grid: &Grid) -> Result<Vec<WorkEntry>> {
    let mut entries = Vec::new();
    for row in data_rows(grid)? {
        if row.is_blank() {
            continue;
        }
        if row.cells().iter().any(|c| c.text_eq_ignore_case(TOTAL_MARKER)) {
            tracing::debug!(row = row.number(), "skipping total row");
            continue;
        }
        let entry = parse_row(row).map_err(|err| Error::invalid_row(row.number(), err))?;
        entries.push(entry);
    }
    Ok(entries)
}

fn parse_row(row: &Row) -> Result<WorkEntry, CellError> {
    let name = row.cell(NAME_COLUMN);
    if name.is_blank() {
        return Err(CellError::with_value("name is missing", name));
    }
    let name = name.to_string();

    let start = timestamp_or_absent(row.cell(START_COLUMN));
    let end = timestamp_or_absent(row.cell(END_COLUMN));
    let hours = parse_hours(row.cell(HOURS_COLUMN))?;

    let entry = match (start, end) {
        (Some(start), Some(end)) => WorkEntry::timed(name, start, end, hours)?,
        (Some(only), None) | (None, Some(only)) => WorkEntry::dated(name, only.date(), hours)?,
        (None, None) => {
            return Err(CellError::new(
                "start and end time are both missing or invalid",
            ));
        }
    };
    Ok(entry)
}

/// Unparseable timestamps count as absent in this layout.
fn timestamp_or_absent(cell: &Cell) -> Option<chrono::NaiveDateTime> {
    parse_timestamp(cell, TIMESTAMP_FORMATS).ok().flatten()
}
