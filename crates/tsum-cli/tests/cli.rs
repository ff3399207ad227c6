//! End-to-end tests for the `tsum` binary.
//!
//! Runs the built binary against generated workbooks with an isolated home
//! directory so no user configuration leaks in.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn tsum_binary() -> String {
    env!("CARGO_BIN_EXE_tsum").to_string()
}

fn tsum(home: &Path, args: &[&str]) -> Output {
    Command::new(tsum_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("TSUM_LAYOUT")
        .env_remove("TSUM_SHEET_NAME")
        .env_remove("TSUM_DATE_FORMAT")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run tsum")
}

fn workbook(dir: &Path, name: &str, rows: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .write_string(
                        u32::try_from(r).unwrap(),
                        u16::try_from(c).unwrap(),
                        *value,
                    )
                    .unwrap();
            }
        }
    }
    workbook.save(&path).unwrap();
    path
}

/// Carry-forward timesheet: two people, one subtotal row each.
fn carry_forward_timesheet(dir: &Path) -> PathBuf {
    workbook(
        dir,
        "timesheet.xlsx",
        &[
            &["Team member", "Date", "Duration", "Hours"],
            &["Jane Doe", "", "12:00:00", "12"],
            &["", "01/15/2024", "08:00:00", "8"],
            &["", "01/17/2024", "04:00:00", "4"],
            &["", "Total", "12:00:00", "12"],
            &["John Roe", "", "06:15:00", "6.25"],
            &["", "01/15/2024", "06:15:00", "6.25"],
            &["", "Total", "06:15:00", "6.25"],
        ],
    )
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_load_prints_the_table_with_the_default_layout() {
    let temp = TempDir::new().unwrap();
    let input = carry_forward_timesheet(temp.path());

    let output = tsum(temp.path(), &["load", input.to_str().unwrap()]);
    assert!(output.status.success(), "load failed: {}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.starts_with("Loaded 3 entries from "), "{stdout}");
    assert!(stdout.contains("(carry-forward)"), "{stdout}");
    assert!(
        stdout.contains("Name      2024-01-15  2024-01-17"),
        "{stdout}"
    );
    assert!(stdout.contains("Jane Doe           8           4"), "{stdout}");
    assert!(stdout.contains("John Roe        6.25"), "{stdout}");
}

#[test]
fn test_export_writes_a_contiguous_date_range() {
    let temp = TempDir::new().unwrap();
    let input = carry_forward_timesheet(temp.path());
    let out = temp.path().join("summary.xlsx");

    let output = tsum(
        temp.path(),
        &["export", input.to_str().unwrap(), out.to_str().unwrap()],
    );
    assert!(output.status.success(), "export failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Exported 2 people across 3 days to "));

    let mut workbook = open_workbook_auto(&out).unwrap();
    let range = workbook.worksheet_range("Summary").unwrap();
    let rows: Vec<Vec<Data>> = range.rows().map(<[Data]>::to_vec).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 4);
    assert_eq!(
        rows[1],
        vec![
            Data::String("Jane Doe".to_string()),
            Data::Float(8.0),
            Data::Empty,
            Data::Float(4.0),
        ]
    );
}

#[test]
fn test_config_file_selects_layout_and_sheet() {
    let temp = TempDir::new().unwrap();
    let input = workbook(
        temp.path(),
        "generic.xlsx",
        &[
            &["Name", "Project", "Start", "End", "Notes", "Hours"],
            &["Jane", "Ops", "2024-01-15 08:00", "2024-01-15 16:00", "", "8"],
        ],
    );
    let config = temp.path().join("tsum.toml");
    std::fs::write(&config, "layout = \"generic\"\nsheet_name = \"Hours\"\n").unwrap();
    let out = temp.path().join("summary.xlsx");

    let output = tsum(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "export",
            input.to_str().unwrap(),
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "export failed: {}", stderr(&output));

    let workbook = open_workbook_auto(&out).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Hours".to_string()]);
}

#[test]
fn test_format_mismatch_exits_with_code_2() {
    let temp = TempDir::new().unwrap();
    let input = carry_forward_timesheet(temp.path());
    let out = temp.path().join("summary.xlsx");

    let output = tsum(
        temp.path(),
        &[
            "export",
            "--layout",
            "generic",
            input.to_str().unwrap(),
            out.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr(&output);
    assert!(
        stderr.starts_with("The selected file does not match the chosen format."),
        "{stderr}"
    );
    assert!(stderr.contains("row 2: invalid start format"), "{stderr}");
    assert!(!out.exists());
}

#[test]
fn test_missing_file_exits_with_code_1() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.xlsx");

    let output = tsum(temp.path(), &["load", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.starts_with("An unexpected error occurred."), "{stderr}");
    assert!(stderr.contains("file not found"), "{stderr}");
}

#[test]
fn test_layouts_lists_all_three() {
    let temp = TempDir::new().unwrap();
    let output = tsum(temp.path(), &["layouts"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    for name in ["start-end", "carry-forward (default)", "generic"] {
        assert!(stdout.contains(name), "missing {name}: {stdout}");
    }
}
