//! Pivoting daily summaries into a person × date table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::entry::DailySummary;
use crate::error::{Error, Result};

/// Header of the first column.
pub const NAME_HEADER: &str = "Name";

/// Sparse pivot of daily totals: one row per person, one column per date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    /// Distinct dates, ascending.
    columns: Vec<NaiveDate>,
    rows: Vec<TableRow>,
}

/// A person's totals, aligned with [`SummaryTable::columns`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub name: String,
    /// `None` where the person has no summary for that date.
    pub cells: Vec<Option<f64>>,
}

/// Builds the pivot table. Fails with [`Error::NoData`] for an empty input.
pub fn build_table(summaries: &[DailySummary]) -> Result<SummaryTable> {
    if summaries.is_empty() {
        return Err(Error::NoData {
            operation: "summarize",
        });
    }

    let columns: Vec<NaiveDate> = summaries
        .iter()
        .map(|s| s.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut by_name: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for summary in summaries {
        let cells = by_name
            .entry(summary.name.as_str())
            .or_insert_with(|| vec![None; columns.len()]);
        // Dates came from this same slice, so the lookup always succeeds.
        if let Ok(idx) = columns.binary_search(&summary.date) {
            cells[idx] = Some(summary.total_hours);
        }
    }

    let rows = by_name
        .into_iter()
        .map(|(name, cells)| TableRow {
            name: name.to_string(),
            cells,
        })
        .collect();

    Ok(SummaryTable { columns, rows })
}

impl SummaryTable {
    pub fn columns(&self) -> &[NaiveDate] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// `Name` followed by each date as `YYYY-MM-DD`.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(NAME_HEADER.to_string())
            .chain(self.columns.iter().map(|d| d.format("%Y-%m-%d").to_string()))
            .collect()
    }

    /// The total for one person on one date, if any.
    pub fn get(&self, name: &str, date: NaiveDate) -> Option<f64> {
        let col = self.columns.binary_search(&date).ok()?;
        self.rows
            .iter()
            .find(|row| row.name == name)
            .and_then(|row| row.cells[col])
    }

    /// Renders a fixed-width text grid for the terminal.
    pub fn render(&self) -> String {
        let header = self.header();
        let name_width = self
            .rows
            .iter()
            .map(|row| row.name.chars().count())
            .chain(std::iter::once(NAME_HEADER.len()))
            .max()
            .unwrap_or(NAME_HEADER.len());

        let mut output = String::new();
        let mut line = format!("{:<name_width$}", header[0]);
        for label in &header[1..] {
            write!(line, "  {label:>10}").unwrap();
        }
        writeln!(output, "{}", line.trim_end()).unwrap();

        for row in &self.rows {
            let mut line = format!("{:<name_width$}", row.name);
            for cell in &row.cells {
                let value = cell.map(format_hours).unwrap_or_default();
                write!(line, "  {value:>10}").unwrap();
            }
            writeln!(output, "{}", line.trim_end()).unwrap();
        }
        output
    }
}

/// Formats hours with at most two decimals and no trailing zeros.
pub fn format_hours(hours: f64) -> String {
    let formatted = format!("{hours:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn summary(name: &str, d: u32, total_hours: f64) -> DailySummary {
        DailySummary {
            name: name.to_string(),
            date: day(d),
            total_hours,
        }
    }

    #[test]
    fn empty_summaries_are_no_data() {
        let err = build_table(&[]).unwrap_err();
        assert!(matches!(err, Error::NoData { .. }));
    }

    #[test]
    fn one_row_per_person_one_column_per_date() {
        let summaries = vec![
            summary("John", 16, 9.0),
            summary("Jane", 15, 7.5),
            summary("John", 15, 8.5),
            summary("Jane", 18, 0.0),
        ];
        let table = build_table(&summaries).unwrap();

        assert_eq!(table.columns(), &[day(15), day(16), day(18)]);
        assert_eq!(
            table.header(),
            vec!["Name", "2024-01-15", "2024-01-16", "2024-01-18"]
        );
        assert_eq!(table.rows().len(), 2);
        for s in &summaries {
            assert_eq!(table.get(&s.name, s.date), Some(s.total_hours));
        }
        assert_eq!(table.get("Jane", day(16)), None);
        assert_eq!(table.get("John", day(18)), None);
        assert_eq!(table.get("Nobody", day(15)), None);
    }

    #[test]
    fn zero_totals_stay_populated() {
        let table = build_table(&[summary("Jane", 18, 0.0)]).unwrap();
        assert_eq!(table.rows()[0].cells, vec![Some(0.0)]);
    }

    #[test]
    fn format_hours_trims_trailing_zeros() {
        assert_eq!(format_hours(9.0), "9");
        assert_eq!(format_hours(8.5), "8.5");
        assert_eq!(format_hours(7.25), "7.25");
        assert_eq!(format_hours(1.0 / 3.0), "0.33");
        assert_eq!(format_hours(0.0), "0");
    }

    #[test]
    fn renders_a_text_grid() {
        let table = build_table(&[
            summary("John", 15, 8.5),
            summary("John", 16, 9.0),
            summary("Jane", 16, 4.25),
        ])
        .unwrap();
        assert_snapshot!(table.render(), @r"
        Name  2024-01-15  2024-01-16
        Jane                    4.25
        John         8.5           9
        ");
    }

    #[test]
    fn serializes_as_columns_and_rows() {
        let table = build_table(&[summary("Jane", 15, 8.5)]).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "columns": ["2024-01-15"],
                "rows": [{"name": "Jane", "cells": [8.5]}]
            })
        );
    }
}
