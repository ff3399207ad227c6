//! Writing the pivoted summary to an `.xlsx` file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

use tsum_core::{Error, ExportPlan, NAME_HEADER, Result, WorkEntry, plan_export};

/// Excel's column limit (`XFD`).
const MAX_COLUMNS: usize = 16_384;

/// Presentation settings for the exported workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Name of the single worksheet.
    pub sheet_name: String,
    /// Number format applied to the date header cells.
    pub date_format: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Summary".to_string(),
            date_format: "mm/dd/yyyy".to_string(),
        }
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub people: usize,
    pub days: usize,
}

/// Writes the person × day summary of `entries` to `output_path`.
///
/// Fails with [`Error::NoData`] before touching the filesystem when there is
/// nothing to export. An existing file at `output_path` is replaced.
pub fn export(
    entries: &[WorkEntry],
    output_path: &Path,
    options: &ExportOptions,
) -> Result<ExportReport> {
    let plan = plan_export(entries)?;
    write_plan(&plan, output_path, options)?;

    let report = ExportReport {
        path: output_path.to_path_buf(),
        people: plan.rows().len(),
        days: plan.dates().len(),
    };
    tracing::info!(
        path = %output_path.display(),
        people = report.people,
        days = report.days,
        "exported summary"
    );
    Ok(report)
}

/// Renders an [`ExportPlan`] as a single-sheet workbook.
pub fn write_plan(plan: &ExportPlan, output_path: &Path, options: &ExportOptions) -> Result<()> {
    if plan.dates().len() + 1 > MAX_COLUMNS {
        return Err(Error::unexpected(format!(
            "date range of {} days does not fit in a worksheet",
            plan.dates().len()
        )));
    }

    let buffer = render(plan, options).map_err(|err| {
        Error::unexpected(format!("failed to build workbook: {err}"))
    })?;
    replace_file(output_path, &buffer)
}

#[allow(clippy::cast_possible_truncation)]
fn render(plan: &ExportPlan, options: &ExportOptions) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&options.sheet_name)?;

    // Header row: "Name", then one date cell per day.
    let date_format = Format::new().set_num_format(&options.date_format);
    sheet.write_string(0, 0, NAME_HEADER)?;
    for (idx, date) in plan.dates().iter().enumerate() {
        let col = (idx + 1) as u16;
        match header_date(*date) {
            Some(day) => sheet.write_datetime_with_format(0, col, &day, &date_format)?,
            None => sheet.write_string(0, col, date.format("%Y-%m-%d").to_string())?,
        };
    }

    for (idx, row) in plan.rows().iter().enumerate() {
        let row_num = (idx + 1) as u32;
        sheet.write_string(row_num, 0, &row.name)?;
        for (col_idx, cell) in row.cells.iter().enumerate() {
            if let Some(hours) = cell {
                sheet.write_number(row_num, (col_idx + 1) as u16, *hours)?;
            }
        }
    }

    sheet.autofit();
    sheet.set_freeze_panes(1, 1)?;

    workbook.save_to_buffer()
}

/// Days Excel cannot hold as a date (before 1900) fall back to ISO text.
fn header_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    ExcelDateTime::from_ymd(year, month, day).ok()
}

/// Writes to a sibling temp file, then renames it over `path`.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::unexpected(format!("invalid output path {}", path.display())))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, bytes).map_err(Error::unexpected)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::unexpected(err));
    }
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote workbook");
    Ok(())
}
