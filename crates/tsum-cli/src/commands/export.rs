//! Export command: load a workbook and write the summary workbook.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tsum_core::Layout;
use tsum_xlsx::ExportOptions;

use super::load::{load_into, loaded_line};
use crate::session::Session;

pub fn run<W: Write>(
    writer: &mut W,
    session: &mut Session,
    layout: Layout,
    input: &Path,
    output: &Path,
    options: &ExportOptions,
) -> Result<()> {
    let outcome = load_into(session, layout, input)?;
    writeln!(writer, "{}", loaded_line(&outcome, layout, input))?;

    let report = session
        .export(output, options)
        .with_context(|| format!("failed to export {}", output.display()))?;
    writeln!(
        writer,
        "Exported {} people across {} days to {}",
        report.people,
        report.days,
        report.path.display()
    )?;
    Ok(())
}
