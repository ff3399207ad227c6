//! Per-person, per-day aggregation of work entries.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entry::{DailySummary, WorkEntry};

/// Sums hours per (name, calendar day).
///
/// Output is ordered by name, then date. An empty input yields an empty output.
pub fn aggregate(entries: &[WorkEntry]) -> Vec<DailySummary> {
    let mut totals: BTreeMap<(&str, NaiveDate), f64> = BTreeMap::new();
    for entry in entries {
        *totals.entry((entry.name(), entry.day())).or_default() += entry.hours();
    }

    tracing::debug!(
        entries = entries.len(),
        summaries = totals.len(),
        "aggregated entries by person and day"
    );

    totals
        .into_iter()
        .map(|((name, date), total_hours)| DailySummary {
            name: name.to_string(),
            date,
            total_hours,
        })
        .collect()
}
