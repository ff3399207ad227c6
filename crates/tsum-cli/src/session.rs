//! Load-then-export session state.
//!
//! Holds the most recently loaded entry set so the export step works on the
//! same data the user just reviewed. A failed load clears it.

use std::path::{Path, PathBuf};

use tsum_core::{Error, Layout, Result, SummaryTable, WorkEntry, aggregate, build_table};
use tsum_xlsx::{ExportOptions, ExportReport, read_entries};

/// Entries from the last successful load.
#[derive(Debug)]
struct Loaded {
    source: PathBuf,
    layout: Layout,
    entries: Vec<WorkEntry>,
}

/// What a successful load produced.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub entries: usize,
    pub table: SummaryTable,
}

#[derive(Debug, Default)]
pub struct Session {
    loaded: Option<Loaded>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path`, aggregates it, and builds the summary table.
    ///
    /// A workbook that yields no entries fails with [`Error::NoData`].
    pub fn load(&mut self, layout: Layout, path: &Path) -> Result<LoadOutcome> {
        self.loaded = None;

        let entries = read_entries(layout, path)?;
        let summaries = aggregate(&entries);
        let table = build_table(&summaries)?;

        let outcome = LoadOutcome {
            entries: entries.len(),
            table,
        };
        self.loaded = Some(Loaded {
            source: path.to_path_buf(),
            layout,
            entries,
        });
        Ok(outcome)
    }

    /// Entries of the last successful load.
    pub fn entries(&self) -> &[WorkEntry] {
        self.loaded.as_ref().map_or(&[], |l| l.entries.as_slice())
    }

    /// Source file and layout of the last successful load.
    pub fn source(&self) -> Option<(&Path, Layout)> {
        self.loaded
            .as_ref()
            .map(|l| (l.source.as_path(), l.layout))
    }

    /// Exports the loaded entries; fails with [`Error::NoData`] if nothing is loaded.
    pub fn export(&self, output: &Path, options: &ExportOptions) -> Result<ExportReport> {
        let Some(loaded) = &self.loaded else {
            return Err(Error::NoData {
                operation: "export",
            });
        };
        tsum_xlsx::export(&loaded.entries, output, options)
    }
}
