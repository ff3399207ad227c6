//! Codec-neutral worksheet cells and the conversions readers apply to them.
//!
//! Workbook libraries hand over cells as a [`Grid`]; everything in here is
//! independent of the file format the grid came from.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CellError;

/// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A single worksheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// A date/time-formatted cell, already converted from its serial.
    DateTime(NaiveDateTime),
    /// An elapsed-time cell such as `[h]:mm:ss`.
    Duration(Duration),
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    /// Empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text content, for text cells only.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// Case-insensitive comparison of the cell's rendered text.
    pub fn text_eq_ignore_case(&self, marker: &str) -> bool {
        match self {
            Self::Text(s) => s.trim().eq_ignore_ascii_case(marker),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Duration(d) => {
                let secs = d.num_seconds();
                write!(f, "{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
            }
        }
    }
}

/// One worksheet row with its 1-based row number.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    number: u32,
    cells: Vec<Cell>,
}

impl Row {
    /// `cells[0]` is column 1 (`A`).
    pub const fn new(number: u32, cells: Vec<Cell>) -> Self {
        Self { number, cells }
    }

    /// 1-based worksheet row number, used in diagnostics.
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Cell at a 1-based column; missing trailing cells read as empty.
    pub fn cell(&self, column: usize) -> &Cell {
        column
            .checked_sub(1)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&EMPTY)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }
}

/// The used area of a worksheet, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    pub const fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Builds a grid whose first row is worksheet row 1.
    pub fn from_rows(rows: impl IntoIterator<Item = Vec<Cell>>) -> Self {
        Self::new(
            rows.into_iter()
                .zip(1u32..)
                .map(|(cells, number)| Row::new(number, cells))
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Splits off the header (first used row) from the data rows.
    pub fn split_header(&self) -> Option<(&Row, &[Row])> {
        self.rows.split_first()
    }
}

/// Converts an Excel serial (days since 1899-12-30, 1900 date system) to a timestamp.
///
/// Serials below 61 (before 1900-03-01) land one day earlier than Excel
/// displays them, since Excel counts a 1900-02-29 that never existed. Below 1
/// only the time of day is meaningful.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
}

/// Converts a day fraction (or multi-day count) to an elapsed duration.
pub fn duration_from_days(days: f64) -> Option<Duration> {
    if !days.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&days) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let millis = (days * MILLIS_PER_DAY).round() as i64;
    Duration::try_milliseconds(millis)
}

/// Parses a timestamp cell.
///
/// Blank cells are `Ok(None)`. Native date/time cells and serial numbers are
/// accepted as-is; text must match one of `formats` (date-only formats yield
/// midnight).
pub fn parse_timestamp(cell: &Cell, formats: &[&str]) -> Result<Option<NaiveDateTime>, CellError> {
    match cell {
        _ if cell.is_blank() => Ok(None),
        Cell::DateTime(dt) => Ok(Some(*dt)),
        Cell::Number(serial) => from_excel_serial(*serial)
            .map(Some)
            .ok_or_else(|| CellError::with_value("invalid date serial", cell)),
        Cell::Text(text) => {
            let text = text.trim();
            formats
                .iter()
                .find_map(|fmt| {
                    NaiveDateTime::parse_from_str(text, fmt).ok().or_else(|| {
                        NaiveDate::parse_from_str(text, fmt)
                            .ok()
                            .map(|d| d.and_time(NaiveTime::MIN))
                    })
                })
                .map(Some)
                .ok_or_else(|| CellError::with_value("invalid timestamp", text))
        }
        Cell::Empty | Cell::Bool(_) | Cell::Duration(_) => {
            Err(CellError::with_value("invalid timestamp", cell))
        }
    }
}

/// Parses a calendar-day cell: native date, serial day number, or `MM/DD/YYYY` text.
pub fn parse_date(cell: &Cell) -> Result<NaiveDate, CellError> {
    match cell {
        Cell::DateTime(dt) => Ok(dt.date()),
        Cell::Number(serial) => from_excel_serial(*serial)
            .map(|dt| dt.date())
            .ok_or_else(|| CellError::with_value("invalid date serial", cell)),
        Cell::Text(text) => NaiveDate::parse_from_str(text.trim(), "%m/%d/%Y")
            .map_err(|_| CellError::with_value("invalid date", text.trim())),
        Cell::Empty => Err(CellError::new("date is empty")),
        Cell::Bool(_) | Cell::Duration(_) => Err(CellError::with_value("invalid date", cell)),
    }
}

/// Parses an elapsed-time cell.
///
/// Accepts a day fraction, a native time of day, a native duration, or
/// `H:M:S` text where the hour part may exceed 24.
pub fn parse_duration(cell: &Cell) -> Result<Duration, CellError> {
    match cell {
        _ if cell.is_blank() => Err(CellError::new("duration is empty")),
        Cell::Number(days) => {
            duration_from_days(*days).ok_or_else(|| CellError::with_value("invalid duration", cell))
        }
        Cell::DateTime(dt) => Ok(dt.time().signed_duration_since(NaiveTime::MIN)),
        Cell::Duration(d) => Ok(*d),
        Cell::Text(text) => parse_hms(text.trim())
            .ok_or_else(|| CellError::with_value("invalid duration format", text.trim())),
        Cell::Empty | Cell::Bool(_) => Err(CellError::with_value("invalid duration", cell)),
    }
}

fn parse_hms(text: &str) -> Option<Duration> {
    let mut parts = text.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let hours: i64 = h.trim().parse::<u32>().ok()?.into();
    let minutes: i64 = m.trim().parse::<u32>().ok()?.into();
    let seconds: i64 = s.trim().parse::<u32>().ok()?.into();
    Duration::try_seconds(hours * 3600 + minutes * 60 + seconds)
}

/// Parses an hours cell: a number, or decimal text in invariant formatting.
///
/// Thousands separators and a leading `+` are tolerated; the sign is checked
/// later when the entry is built.
pub fn parse_hours(cell: &Cell) -> Result<f64, CellError> {
    let value = match cell {
        _ if cell.is_blank() => return Err(CellError::new("hours is empty")),
        Cell::Number(n) => *n,
        Cell::Text(text) => {
            let normalized: String = text.trim().chars().filter(|c| *c != ',').collect();
            normalized
                .trim_start_matches('+')
                .parse::<f64>()
                .map_err(|_| CellError::with_value("invalid hours value", text.trim()))?
        }
        Cell::Empty | Cell::Bool(_) | Cell::DateTime(_) | Cell::Duration(_) => {
            return Err(CellError::with_value("invalid hours value", cell));
        }
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CellError::with_value("invalid hours value", cell))
    }
}
