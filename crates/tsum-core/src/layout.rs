//! Layout enum as the single source of truth for supported sheet layouts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::Grid;
use crate::entry::WorkEntry;
use crate::error::{Error, Result};
use crate::{carry_forward, generic, start_end};

/// Spreadsheet conventions understood by the readers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Vendor timecard: one row per shift with start and end timestamps.
    StartEnd,
    /// Vendor timesheet: a name row followed by per-day detail rows.
    #[default]
    CarryForward,
    /// Plain timesheet with `yyyy-mm-dd hh:mm` timestamps.
    Generic,
}

/// Returned when a layout name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout: {0} (expected one of: start-end, carry-forward, generic)")]
pub struct UnknownLayout(pub String);

impl Layout {
    pub const ALL: [Self; 3] = [Self::StartEnd, Self::CarryForward, Self::Generic];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartEnd => "start-end",
            Self::CarryForward => "carry-forward",
            Self::Generic => "generic",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::StartEnd => "timecard rows with start/end timestamps; TOTAL rows skipped",
            Self::CarryForward => "name row followed by date/duration/hours detail rows",
            Self::Generic => "timesheet rows with yyyy-mm-dd hh:mm start/end timestamps",
        }
    }

    /// Column headings and their 1-based column numbers.
    pub const fn columns(self) -> &'static [(&'static str, usize)] {
        match self {
            Self::StartEnd => &[
                ("name", start_end::NAME_COLUMN),
                ("start", start_end::START_COLUMN),
                ("end", start_end::END_COLUMN),
                ("hours", start_end::HOURS_COLUMN),
            ],
            Self::CarryForward => &[
                ("name", carry_forward::NAME_COLUMN),
                ("date", carry_forward::DATE_COLUMN),
                ("duration", carry_forward::DURATION_COLUMN),
                ("hours", carry_forward::HOURS_COLUMN),
            ],
            Self::Generic => &[
                ("name", generic::NAME_COLUMN),
                ("start", generic::START_COLUMN),
                ("end", generic::END_COLUMN),
                ("hours", generic::HOURS_COLUMN),
            ],
        }
    }

    /// Turns the first worksheet of a workbook into work entries.
    ///
    /// Any row-level failure aborts the whole read; partial results are dropped.
    pub fn parse(self, grid: &Grid) -> Result<Vec<WorkEntry>> {
        let entries = match self {
            Self::StartEnd => start_end::parse(grid),
            Self::CarryForward => carry_forward::parse(grid),
            Self::Generic => generic::parse(grid),
        }?;
        tracing::debug!(layout = %self, entries = entries.len(), "parsed worksheet");
        Ok(entries)
    }
}

/// Splits the header row off, failing when the worksheet has no rows at all.
pub(crate) fn data_rows(grid: &Grid) -> Result<&[crate::cell::Row]> {
    grid.split_header()
        .map(|(_, rows)| rows)
        .ok_or_else(|| Error::invalid_file("worksheet is empty (missing header row)"))
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start-end" | "timecard" => Ok(Self::StartEnd),
            "carry-forward" | "timesheet" => Ok(Self::CarryForward),
            "generic" => Ok(Self::Generic),
            _ => Err(UnknownLayout(s.to_string())),
        }
    }
}

impl Serialize for Layout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
