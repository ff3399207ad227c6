//! User-facing failure messages.
//!
//! A layout mismatch gets its own message so the user knows to pick another
//! layout rather than suspect the file or the tool.

use std::process::ExitCode;

/// Broad failure class shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The workbook does not follow the chosen layout.
    FormatMismatch,
    /// Missing files, empty results, I/O and codec errors.
    Unexpected,
}

impl Failure {
    pub fn classify(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<tsum_core::Error>() {
            Some(core) if core.is_format_mismatch() => Self::FormatMismatch,
            _ => Self::Unexpected,
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::FormatMismatch => "The selected file does not match the chosen format.",
            Self::Unexpected => "An unexpected error occurred.",
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::FormatMismatch => ExitCode::from(2),
            Self::Unexpected => ExitCode::FAILURE,
        }
    }

    /// Headline followed by the full error chain.
    pub fn render(self, err: &anyhow::Error) -> String {
        format!("{}\n\n{err:#}", self.headline())
    }
}
