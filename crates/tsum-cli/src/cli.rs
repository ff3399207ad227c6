//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tsum_core::Layout;

/// Timesheet pivot.
///
/// Reads vendor timesheet workbooks, totals hours per person per day, and
/// writes the result as a person × date summary workbook.
#[derive(Debug, Parser)]
#[command(name = "tsum", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read a workbook and print hours per person per day.
    Load {
        /// Workbook to read (first worksheet only).
        input: PathBuf,

        /// Input layout (start-end, carry-forward, generic). Defaults to the configured layout.
        #[arg(short, long)]
        layout: Option<Layout>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Read a workbook and write the summary workbook.
    Export {
        /// Workbook to read (first worksheet only).
        input: PathBuf,

        /// Destination `.xlsx`; an existing file is replaced.
        output: PathBuf,

        /// Input layout (start-end, carry-forward, generic). Defaults to the configured layout.
        #[arg(short, long)]
        layout: Option<Layout>,
    },

    /// List supported input layouts and their columns.
    Layouts,
}
