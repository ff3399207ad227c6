//! Load command: read a workbook and print the person × date totals.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tsum_core::{Layout, SummaryTable};

use crate::session::{LoadOutcome, Session};

#[derive(Serialize)]
struct JsonLoad<'a> {
    source: String,
    layout: Layout,
    entries: usize,
    table: &'a SummaryTable,
}

/// Loads `input` into the session, with the path attached to any failure.
pub(crate) fn load_into(session: &mut Session, layout: Layout, input: &Path) -> Result<LoadOutcome> {
    session
        .load(layout, input)
        .with_context(|| format!("failed to load {}", input.display()))
}

pub(crate) fn loaded_line(outcome: &LoadOutcome, layout: Layout, input: &Path) -> String {
    format!(
        "Loaded {} entries from {} ({layout})",
        outcome.entries,
        input.display()
    )
}

pub fn run<W: Write>(
    writer: &mut W,
    session: &mut Session,
    layout: Layout,
    input: &Path,
    json: bool,
) -> Result<()> {
    let outcome = load_into(session, layout, input)?;
    tracing::debug!(
        entries = outcome.entries,
        people = outcome.table.rows().len(),
        days = outcome.table.columns().len(),
        "built summary table"
    );

    if json {
        let payload = JsonLoad {
            source: input.display().to_string(),
            layout,
            entries: outcome.entries,
            table: &outcome.table,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&payload)?)?;
        return Ok(());
    }

    writeln!(writer, "{}", loaded_line(&outcome, layout, input))?;
    writeln!(writer)?;
    write!(writer, "{}", outcome.table.render())?;
    Ok(())
}
