//! Plain timesheet layout with fixed-pattern timestamps.
//!
//! Columns: name (1), start (3), end (4), hours (6). Timestamps written as
//! text must follow `yyyy-mm-dd hh:mm`. Rows without a name are ignored.

use chrono::NaiveDateTime;

use crate::cell::{Cell, Grid, Row, parse_hours, parse_timestamp};
use crate::entry::WorkEntry;
use crate::error::{CellError, Error, Result};
use crate::layout::data_rows;

pub const NAME_COLUMN: usize = 1;
pub const START_COLUMN: usize = 3;
pub const END_COLUMN: usize = 4;
pub const HOURS_COLUMN: usize = 6;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse(grid: &Grid) -> Result<Vec<WorkEntry>> {
    data_rows(grid)?
        .iter()
        .filter(|row| !row.cell(NAME_COLUMN).is_blank())
        .map(|row| parse_row(row).map_err(|err| Error::invalid_row(row.number(), err)))
        .collect()
}

fn parse_row(row: &Row) -> Result<WorkEntry, CellError> {
    let name = row.cell(NAME_COLUMN).to_string();
    let start = required_timestamp(row.cell(START_COLUMN), "start")?;
    let end = required_timestamp(row.cell(END_COLUMN), "end")?;
    let hours = parse_hours(row.cell(HOURS_COLUMN))?;
    Ok(WorkEntry::timed(name, start, end, hours)?)
}

fn required_timestamp(cell: &Cell, label: &str) -> Result<NaiveDateTime, CellError> {
    match parse_timestamp(cell, &[TIMESTAMP_FORMAT]) {
        Ok(Some(ts)) => Ok(ts),
        Ok(None) => Err(CellError::new(format!("{label} is empty"))),
        Err(err) => Err(CellError {
            message: format!("invalid {label} format"),
            ..err
        }),
    }
}
