//! Loading the first worksheet of a workbook into a [`Grid`].

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::NaiveDateTime;

use tsum_core::cell::{duration_from_days, from_excel_serial};
use tsum_core::{Cell, Error, Grid, Layout, Result, Row, WorkEntry};

/// Reads work entries from the first worksheet of the workbook at `path`.
pub fn read_entries(layout: Layout, path: &Path) -> Result<Vec<WorkEntry>> {
    let grid = read_grid(path)?;
    let entries = layout.parse(&grid)?;
    tracing::info!(
        path = %path.display(),
        %layout,
        entries = entries.len(),
        "loaded work entries"
    );
    Ok(entries)
}

/// Opens the workbook and converts its first worksheet.
///
/// The workbook handle is dropped before returning, on every path.
pub fn read_grid(path: &Path) -> Result<Grid> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|err| {
        Error::unexpected(format!("failed to open workbook {}: {err}", path.display()))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::invalid_file("no worksheet found in workbook"))?
        .map_err(|err| Error::invalid_file(format!("unreadable worksheet: {err}")))?;

    let grid = grid_from_range(&range);
    tracing::debug!(rows = grid.rows().len(), "read first worksheet");
    Ok(grid)
}

/// Re-anchors the used range at `A1` so rows and columns keep their sheet numbers.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let Some((first_row, first_col)) = range.start() else {
        return Grid::default();
    };
    let pad = first_col as usize;

    let rows = range
        .rows()
        .zip(first_row..)
        .map(|(cells, idx)| {
            let cells = std::iter::repeat_n(Cell::Empty, pad)
                .chain(cells.iter().map(to_cell))
                .collect();
            Row::new(idx + 1, cells)
        })
        .collect();
    Grid::new(rows)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            let converted = if dt.is_duration() {
                duration_from_days(serial).map(Cell::Duration)
            } else {
                from_excel_serial(serial).map(Cell::DateTime)
            };
            converted.unwrap_or(Cell::Number(serial))
        }
        Data::DateTimeIso(s) => parse_iso(s).map_or_else(|| Cell::Text(s.clone()), Cell::DateTime),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}
