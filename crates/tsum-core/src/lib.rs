//! Core domain logic for timesheet summaries.
//!
//! This crate contains the fundamental types and logic for:
//! - Readers: turning a worksheet [`Grid`] into [`WorkEntry`] values per [`Layout`]
//! - Aggregation: summing hours per person and calendar day
//! - Pivoting: the [`SummaryTable`] and the [`ExportPlan`] written to disk

mod aggregate;
pub mod carry_forward;
pub mod cell;
mod entry;
mod error;
mod export;
pub mod generic;
mod layout;
pub mod start_end;
mod table;

pub use aggregate::aggregate;
pub use cell::{Cell, Grid, Row};
pub use entry::{DailySummary, EntryTime, WorkEntry};
pub use error::{CellError, Error, FormatError, Result, ValidationError};
pub use export::{ExportPlan, ExportRow, plan_export};
pub use layout::{Layout, UnknownLayout};
pub use table::{NAME_HEADER, SummaryTable, TableRow, build_table, format_hours};
