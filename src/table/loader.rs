//! Spreadsheet loading.
//!
//! This module reads the first worksheet of a workbook into a [`Table`]
//! using `calamine`, which detects xlsx, xlsm, xlsb, xls and ods files from
//! the path's extension.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::InputKind;

use super::cell::parse_date_text;
use super::{Cell, Row, Table};

/// Loads one payroll input from a spreadsheet file.
///
/// The first row of the first worksheet is taken as the header; every
/// following row is kept in order. No schema enforcement happens here.
///
/// # Arguments
///
/// * `path` - Path to the workbook
/// * `kind` - Which payroll input the workbook holds, used to label errors
///
/// # Returns
///
/// Returns `SourceReadError` if the file cannot be opened or parsed as a
/// workbook, has no worksheet, or its first worksheet has no header row.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::models::InputKind;
/// use payroll_engine::table::load_table;
///
/// let roster = load_table("uploads/base_salary.xlsx", InputKind::Roster)?;
/// println!("{} employees", roster.len());
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
pub fn load_table<P: AsRef<Path>>(path: P, kind: InputKind) -> PayrollResult<Table> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let read_error = |message: String| PayrollError::SourceReadError {
        input: kind,
        path: path_str.clone(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error("workbook contains no worksheets".to_string()))?
        .map_err(|e| read_error(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let header = sheet_rows
        .next()
        .ok_or_else(|| read_error("worksheet has no header row".to_string()))?;
    let headers: Vec<String> = header
        .iter()
        .map(|data| to_cell(data).text().unwrap_or_default())
        .collect();

    // Range coordinates are 0-based and start at the first used cell.
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows: Vec<Row> = sheet_rows
        .enumerate()
        .map(|(i, cells)| Row {
            number: first_row + i + 2,
            cells: cells.iter().map(to_cell).collect(),
        })
        .collect();

    let table = Table::with_numbered_rows(kind, headers, rows);
    debug!(
        input = %kind,
        path = %path_str,
        columns = table.columns().len(),
        rows = table.len(),
        "Loaded input table"
    );
    Ok(table)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::DateTime(value),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => iso_cell(s),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(format!("{:?}", e)),
    }
}

fn iso_cell(value: &str) -> Cell {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Cell::DateTime(dt);
    }
    match parse_date_text(value) {
        Some(date) => Cell::Date(date),
        None => Cell::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;

    #[test]
    fn test_load_xlsx_preserves_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Employee_ID").unwrap();
        sheet.write_string(0, 1, "Employee_Name").unwrap();
        sheet.write_string(0, 2, "Base_Salary").unwrap();
        sheet.write_string(1, 0, "E1").unwrap();
        sheet.write_string(1, 1, "Alice").unwrap();
        sheet.write_number(1, 2, 3000.0).unwrap();
        sheet.write_number(2, 0, 102.0).unwrap();
        sheet.write_string(2, 1, "Bob").unwrap();
        sheet.write_number(2, 2, 2000.5).unwrap();
        workbook.save(&path).unwrap();

        let table = load_table(&path, InputKind::Roster).unwrap();

        assert_eq!(
            table.columns(),
            &["employee_id", "employee_name", "base_salary"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].cell(0), &Cell::from("E1"));
        assert_eq!(table.rows()[0].number, 2);
        assert_eq!(table.rows()[1].cell(0).employee_id().unwrap().as_str(), "102");
        assert_eq!(table.rows()[1].cell(2), &Cell::Float(2000.5));
    }

    #[test]
    fn test_missing_file_returns_source_read_error() {
        let result = load_table("/nonexistent/roster.xlsx", InputKind::Roster);
        match result {
            Err(PayrollError::SourceReadError { input, path, .. }) => {
                assert_eq!(input, InputKind::Roster);
                assert!(path.contains("roster.xlsx"));
            }
            other => panic!("Expected SourceReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_workbook_returns_source_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.xlsx");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let result = load_table(&path, InputKind::Attendance);
        assert!(matches!(
            result,
            Err(PayrollError::SourceReadError {
                input: InputKind::Attendance,
                ..
            })
        ));
    }

    #[test]
    fn test_unsupported_extension_returns_source_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deductions.txt");
        std::fs::write(&path, "employee_id,advance\nE1,10\n").unwrap();

        let result = load_table(&path, InputKind::Deductions);
        assert!(matches!(
            result,
            Err(PayrollError::SourceReadError { .. })
        ));
    }

    #[test]
    fn test_empty_worksheet_returns_source_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        let result = load_table(&path, InputKind::Roster);
        match result {
            Err(PayrollError::SourceReadError { message, .. }) => {
                assert!(message.contains("no header row"));
            }
            other => panic!("Expected SourceReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_iso_cells_become_dates() {
        assert_eq!(
            iso_cell("2025-08-01"),
            Cell::Date(chrono::NaiveDate::from_ymd_opt(2025, 8, 1).unwrap())
        );
        assert_eq!(iso_cell("not a date"), Cell::from("not a date"));
    }
}
