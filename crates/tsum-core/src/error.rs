//! Error taxonomy for reading, summarizing, and exporting timesheets.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by readers, the aggregator, the table builder and the exporter.
#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not resolve to an existing file.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A row or cell violates the expected layout.
    #[error("invalid format: {0}")]
    InvalidFormat(FormatError),

    /// A step was invoked with an empty input collection.
    #[error("no data to {operation}")]
    NoData { operation: &'static str },

    /// Anything else, typically an I/O or workbook codec failure.
    #[error("unexpected error: {0}")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wraps an arbitrary error as [`Error::Unexpected`].
    pub fn unexpected(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Unexpected(err.into())
    }

    /// A file-level format failure that is not tied to any row.
    pub fn invalid_file(message: impl Into<String>) -> Self {
        Self::InvalidFormat(FormatError {
            row: None,
            message: message.into(),
            value: None,
        })
    }

    /// Annotates a cell failure with the 1-based worksheet row it came from.
    pub fn invalid_row(row: u32, err: impl Into<CellError>) -> Self {
        let CellError { message, value } = err.into();
        Self::InvalidFormat(FormatError {
            row: Some(row),
            message,
            value,
        })
    }

    /// Returns true for layout mismatches, as opposed to missing files or I/O trouble.
    pub const fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::InvalidFormat(_))
    }
}

/// Details of an [`Error::InvalidFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// 1-based worksheet row, absent for file-level problems.
    pub row: Option<u32>,
    pub message: String,
    /// Raw cell text that failed to parse.
    pub value: Option<String>,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "row {row}: ")?;
        }
        write!(f, "{}", self.message)?;
        if let Some(value) = &self.value {
            write!(f, " '{value}'")?;
        }
        Ok(())
    }
}

/// A single cell that could not be interpreted.
///
/// Row numbers are attached later, at the row boundary, via [`Error::invalid_row`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CellError {
    pub message: String,
    pub value: Option<String>,
}

impl CellError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(message: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

/// Validation errors raised while constructing a [`crate::WorkEntry`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Hours must be finite and non-negative.
    #[error("hours must be a non-negative number, got {value}")]
    InvalidHours { value: f64 },

    /// End time precedes start time.
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },
}

impl From<ValidationError> for CellError {
    fn from(err: ValidationError) -> Self {
        Self::new(err.to_string())
    }
}
