//! Workbook boundary for timesheet summaries.
//!
//! Reading goes through `calamine`, which auto-detects `.xlsx`, `.xlsm`,
//! `.xls` and `.ods` by extension. Only the first worksheet is read; it is
//! converted into a [`tsum_core::Grid`] so the layout readers never see the
//! codec's own cell types.
//!
//! Writing goes through `rust_xlsxwriter` and always produces `.xlsx`.
//!
//! # Date system
//!
//! Serial dates are interpreted in the 1900 date system. Workbooks saved with
//! the 1904 system will read four years and a day early. Serials before
//! 1900-03-01 read one day early because of Excel's phantom 1900-02-29.

mod reader;
mod writer;

pub use reader::{read_entries, read_grid};
pub use writer::{ExportOptions, ExportReport, export, write_plan};
