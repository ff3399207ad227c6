//! Timesheet layout where a name row introduces the detail rows below it.
//!
//! ```text
//! Team member | Date       | Duration | Hours
//! John        |            | 17:30:00 | 17.5     <- summary row, sets the person
//!             | 01/15/2024 | 08:30:00 | 8.5      <- detail rows, attributed to John
//!             | 01/16/2024 | 09:00:00 | 9
//!             | Total      | 17:30:00 | 17.5     <- skipped
//! ```
//!
//! The current person is threaded through the rows as a fold accumulator.

use crate::cell::{Grid, Row, parse_date, parse_duration, parse_hours};
use crate::entry::WorkEntry;
use crate::error::{CellError, Error, Result};
use crate::layout::data_rows;

pub const NAME_COLUMN: usize = 1;
pub const DATE_COLUMN: usize = 2;
pub const DURATION_COLUMN: usize = 3;
pub const HOURS_COLUMN: usize = 4;

const TOTAL_MARKER: &str = "Total";

/// How a single row participates in the fold.
#[derive(Debug, PartialEq)]
enum RowKind {
    /// A subtotal line.
    Total,
    /// A row naming the person for the detail rows that follow.
    Person(String),
    /// Every cell blank.
    Blank,
    /// Blank date; nothing to record.
    Spacer,
    Detail,
}

fn classify(row: &Row) -> RowKind {
    let date = row.cell(DATE_COLUMN);
    if date.text_eq_ignore_case(TOTAL_MARKER) {
        return RowKind::Total;
    }
    let name = row.cell(NAME_COLUMN);
    if !name.is_blank() {
        return RowKind::Person(name.to_string().trim().to_string());
    }
    if row.is_blank() {
        return RowKind::Blank;
    }
    if date.is_blank() {
        return RowKind::Spacer;
    }
    RowKind::Detail
}

/// Parsing state carried from one row to the next.
#[derive(Debug, Default)]
struct Carry {
    current_name: Option<String>,
    entries: Vec<WorkEntry>,
}

impl Carry {
    fn step(mut self, row: &Row) -> Result<Self> {
        let kind = classify(row);
        match kind {
            RowKind::Total => {
                tracing::debug!(row = row.number(), "skipping total row");
            }
            RowKind::Person(name) => {
                tracing::trace!(row = row.number(), %name, "switching person");
                self.current_name = Some(name);
            }
            RowKind::Blank => {
                tracing::trace!(row = row.number(), "skipping blank row");
            }
            RowKind::Spacer | RowKind::Detail => {
                let Some(name) = self.current_name.as_deref() else {
                    return Err(Error::invalid_row(row.number(), nameless(row)));
                };
                if kind == RowKind::Spacer {
                    tracing::trace!(row = row.number(), "skipping spacer row");
                } else {
                    let entry = parse_detail(name, row)
                        .map_err(|err| Error::invalid_row(row.number(), err))?;
                    self.entries.push(entry);
                }
            }
        }
        Ok(self)
    }
}

/// A non-blank row seen before any name row, reported with its first filled cell.
fn nameless(row: &Row) -> CellError {
    let raw = row
        .cells()
        .iter()
        .find(|cell| !cell.is_blank())
        .map(ToString::to_string)
        .unwrap_or_default();
    CellError::with_value("name missing before data rows", raw)
}

pub fn parse(grid: &Grid) -> Result<Vec<WorkEntry>> {
    let carry = data_rows(grid)?
        .iter()
        .try_fold(Carry::default(), Carry::step)?;
    Ok(carry.entries)
}

fn parse_detail(name: &str, row: &Row) -> Result<WorkEntry, CellError> {
    let date = parse_date(row.cell(DATE_COLUMN))?;
    // Validated for shape only; the reported hours are authoritative.
    let duration = parse_duration(row.cell(DURATION_COLUMN))?;
    let hours = parse_hours(row.cell(HOURS_COLUMN))?;
    tracing::trace!(
        row = row.number(),
        %date,
        duration_secs = duration.num_seconds(),
        hours,
        "parsed detail row"
    );
    Ok(WorkEntry::dated(name, date, hours)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::cell::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn row(cells: [&str; 4]) -> Vec<Cell> {
        cells
            .into_iter()
            .map(|s| if s.is_empty() { Cell::Empty } else { text(s) })
            .collect()
    }

    fn header() -> Vec<Cell> {
        row(["Team member", "Date", "Duration", "Hours"])
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn attributes_detail_rows_to_the_preceding_name() {
        let grid = Grid::from_rows([
            header(),
            row(["John", "", "17:30:00", "17.5"]),
            row(["", "01/15/2024", "08:30:00", "8.5"]),
            row(["", "01/16/2024", "09:00:00", "9"]),
            row(["", "Total", "17:30:00", "17.5"]),
            row(["Mary", "", "", ""]),
            row(["", "01/15/2024", "04:00:00", "4"]),
        ]);
        let entries = parse(&grid).unwrap();

        let got: Vec<_> = entries
            .iter()
            .map(|e| (e.name(), e.day(), e.hours()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("John", day(1, 15), 8.5),
                ("John", day(1, 16), 9.0),
                ("Mary", day(1, 15), 4.0),
            ]
        );
    }

    #[test]
    fn detail_row_before_any_name_is_fatal() {
        let grid = Grid::from_rows([header(), row(["", "01/15/2024", "08:30:00", "8.5"])]);
        let err = parse(&grid).unwrap_err();
        assert!(err.is_format_mismatch());
        assert_eq!(
            err.to_string(),
            "invalid format: row 2: name missing before data rows '01/15/2024'"
        );
    }

    #[test]
    fn dateless_row_before_any_name_is_fatal() {
        let grid = Grid::from_rows([
            header(),
            row(["", "", "08:00:00", "8"]),
            row(["John", "", "", ""]),
            row(["", "01/15/2024", "08:00:00", "8"]),
        ]);
        let err = parse(&grid).unwrap_err();
        assert!(err.is_format_mismatch());
        assert_eq!(
            err.to_string(),
            "invalid format: row 2: name missing before data rows '08:00:00'"
        );
    }

    #[test]
    fn blank_and_spacer_rows_are_skipped() {
        let grid = Grid::from_rows([
            header(),
            row(["", "", "", ""]),
            row(["John", "", "", ""]),
            row(["", "", "08:00:00", "8"]),
            row(["", "01/15/2024", "08:00:00", "8"]),
        ]);
        assert_eq!(parse(&grid).unwrap().len(), 1);
    }

    #[test]
    fn total_rows_never_produce_entries() {
        let grid = Grid::from_rows([
            header(),
            row(["John", "", "", ""]),
            row(["", "TOTAL", "08:00:00", "8"]),
        ]);
        assert!(parse(&grid).unwrap().is_empty());
    }

    #[test]
    fn duration_over_a_day_is_accepted() {
        let grid = Grid::from_rows([
            header(),
            row(["John", "", "", ""]),
            row(["", "01/15/2024", "25:00:00", "25"]),
        ]);
        let entries = parse(&grid).unwrap();
        assert!((entries[0].hours() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn native_and_serial_cells_are_understood() {
        let native = day(1, 17).and_hms_opt(0, 0, 0).unwrap();
        let grid = Grid::from_rows([
            header(),
            row(["John", "", "", ""]),
            vec![Cell::Empty, Cell::Number(45306.0), Cell::Number(0.25), Cell::Number(6.0)],
            vec![
                Cell::Empty,
                Cell::DateTime(native),
                Cell::Duration(chrono::Duration::hours(7)),
                Cell::Number(7.0),
            ],
        ]);
        let entries = parse(&grid).unwrap();
        assert_eq!(entries[0].day(), day(1, 15));
        assert_eq!(entries[1].day(), day(1, 17));
    }

    #[test]
    fn bad_cells_report_row_and_value() {
        let cases = [
            (row(["", "2024-01-15", "08:00:00", "8"]), "row 3: invalid date '2024-01-15'"),
            (row(["", "01/15/2024", "", "8"]), "row 3: duration is empty"),
            (row(["", "01/15/2024", "8h", "8"]), "row 3: invalid duration format '8h'"),
            (row(["", "01/15/2024", "08:00:00", ""]), "row 3: hours is empty"),
            (row(["", "01/15/2024", "08:00:00", "x"]), "row 3: invalid hours value 'x'"),
        ];
        for (detail, expected) in cases {
            let grid = Grid::from_rows([header(), row(["John", "", "", ""]), detail]);
            let err = parse(&grid).unwrap_err();
            assert!(
                err.to_string().ends_with(expected),
                "expected {expected:?}, got {err}"
            );
        }
    }

    #[test]
    fn classify_checks_total_before_name() {
        let total = Row::new(5, row(["John", "Total", "", ""]));
        assert_eq!(classify(&total), RowKind::Total);
        assert_eq!(classify(&Row::new(6, row(["", " ", "", ""]))), RowKind::Blank);
        assert_eq!(classify(&Row::new(7, row(["", "", "1:00:00", ""]))), RowKind::Spacer);
    }
}
