//! Work entries and daily summaries.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::ValidationError;

/// When the work happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryTime {
    /// A start/end pair with the hours reported for it.
    Timed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// A calendar day with no time of day.
    Dated { date: NaiveDate },
}

/// One attributed unit of worked time.
///
/// Only constructible through [`WorkEntry::timed`] and [`WorkEntry::dated`],
/// which enforce a non-blank name, non-negative hours, and `end >= start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkEntry {
    name: String,
    time: EntryTime,
    hours: f64,
}

impl WorkEntry {
    /// Creates an entry from a start/end pair.
    pub fn timed(
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        hours_worked: f64,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
        Self::new(name.into(), EntryTime::Timed { start, end }, hours_worked)
    }

    /// Creates an entry for a whole calendar day.
    pub fn dated(
        name: impl Into<String>,
        date: NaiveDate,
        hours: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(name.into(), EntryTime::Dated { date }, hours)
    }

    fn new(name: String, time: EntryTime, hours: f64) -> Result<Self, ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if !hours.is_finite() || hours < 0.0 {
            return Err(ValidationError::InvalidHours { value: hours });
        }
        Ok(Self { name, time, hours })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn time(&self) -> &EntryTime {
        &self.time
    }

    /// Hours worked, whichever variant this entry is.
    pub const fn hours(&self) -> f64 {
        self.hours
    }

    pub const fn start_time(&self) -> Option<NaiveDateTime> {
        match self.time {
            EntryTime::Timed { start, .. } => Some(start),
            EntryTime::Dated { .. } => None,
        }
    }

    pub const fn end_time(&self) -> Option<NaiveDateTime> {
        match self.time {
            EntryTime::Timed { end, .. } => Some(end),
            EntryTime::Dated { .. } => None,
        }
    }

    /// The calendar day this entry counts towards.
    ///
    /// Timed entries are attributed to the day they started.
    pub fn day(&self) -> NaiveDate {
        match self.time {
            EntryTime::Timed { start, .. } => start.date(),
            EntryTime::Dated { date } => date,
        }
    }
}

/// Aggregated hours for one person on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub name: String,
    pub date: NaiveDate,
    pub total_hours: f64,
}
