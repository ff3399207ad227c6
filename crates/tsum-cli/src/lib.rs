//! Timesheet pivot CLI library.
//!
//! This crate provides the `tsum` command: load a vendor timesheet, review the
//! person × date totals, and export them as a summary workbook.

mod cli;
pub mod commands;
mod config;
pub mod session;
mod status;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use session::{LoadOutcome, Session};
pub use status::Failure;
