//! Layouts command: list the supported input layouts.

use std::io::Write;

use anyhow::Result;
use tsum_core::Layout;

pub fn run<W: Write>(writer: &mut W, default: Layout) -> Result<()> {
    for layout in Layout::ALL {
        let marker = if layout == default { " (default)" } else { "" };
        writeln!(writer, "{}{marker}", layout.as_str())?;
        writeln!(writer, "  {}", layout.description())?;
        let columns = layout
            .columns()
            .iter()
            .map(|(label, col)| format!("{label}={col}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(writer, "  columns: {columns}")?;
    }
    Ok(())
}
