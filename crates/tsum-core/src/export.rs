//! Layout of the exported summary sheet, independent of the file writer.
//!
//! Unlike [`crate::table::SummaryTable`], the export grid covers every day
//! between the first and last entry and only fills cells whose summed hours
//! are strictly positive.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::entry::WorkEntry;
use crate::error::{Error, Result};

/// The grid written to the `Summary` sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    dates: Vec<NaiveDate>,
    rows: Vec<ExportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub name: String,
    /// One cell per date in [`ExportPlan::dates`]; `None` renders blank.
    pub cells: Vec<Option<f64>>,
}

/// Computes the export grid from raw entries.
pub fn plan_export(entries: &[WorkEntry]) -> Result<ExportPlan> {
    let (Some(first), Some(last)) = (
        entries.iter().map(WorkEntry::day).min(),
        entries.iter().map(WorkEntry::day).max(),
    ) else {
        return Err(Error::NoData {
            operation: "export",
        });
    };

    let dates: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
    let names: BTreeSet<&str> = entries.iter().map(WorkEntry::name).collect();

    let mut sums: HashMap<(&str, NaiveDate), f64> = HashMap::new();
    for entry in entries {
        *sums.entry((entry.name(), entry.day())).or_default() += entry.hours();
    }

    let rows = names
        .into_iter()
        .map(|name| ExportRow {
            name: name.to_string(),
            cells: dates
                .iter()
                .map(|date| sums.get(&(name, *date)).copied().filter(|h| *h > 0.0))
                .collect(),
        })
        .collect();

    Ok(ExportPlan { dates, rows })
}

impl ExportPlan {
    /// Every calendar day from the earliest to the latest entry, inclusive.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// People in ascending name order.
    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn cell(&self, name: &str, date: NaiveDate) -> Option<f64> {
        let col = self.dates.binary_search(&date).ok()?;
        self.rows
            .iter()
            .find(|row| row.name == name)
            .and_then(|row| row.cells[col])
    }
}
