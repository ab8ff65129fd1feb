//! Spreadsheet output of rendered reports.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};
use tracing::info;

use crate::error::{PayrollError, PayrollResult};

use super::report::{ColumnKind, Report, ReportRecord, ReportValue, render_report};

/// Name of the single worksheet in the exported workbook.
pub const REPORT_SHEET_NAME: &str = "Salary Voucher";

/// Renders records and writes them as a single-sheet xlsx workbook.
///
/// Nothing is written if any record is missing a report value.
///
/// # Arguments
///
/// * `records` - The results to export, in display order
/// * `path` - The destination file
///
/// # Returns
///
/// Returns `ExportSchemaError` for incomplete records, or `ExportWriteError`
/// if the workbook cannot be written.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::{PayrollOptions, PayrollSources, compute_payroll};
/// use payroll_engine::export::export_report;
///
/// let sources = PayrollSources {
///     roster: "uploads/base_salary.xlsx".into(),
///     attendance: "uploads/attendance.xlsx".into(),
///     deductions: "uploads/deductions.xlsx".into(),
/// };
/// let results = compute_payroll(&sources, &PayrollOptions::default())?;
/// export_report(&results, "outputs/salary_tally_import.xlsx")?;
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
pub fn export_report<R: ReportRecord, P: AsRef<Path>>(records: &[R], path: P) -> PayrollResult<()> {
    let report = render_report(records)?;
    write_report(&report, path)
}

/// Writes an already rendered report as an xlsx workbook.
pub fn write_report<P: AsRef<Path>>(report: &Report, path: P) -> PayrollResult<()> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let mut workbook = build_workbook(report).map_err(|e| write_error(&path_str, e))?;
    workbook.save(path).map_err(|e| write_error(&path_str, e))?;

    info!(path = %path_str, rows = report.rows().len(), "Report exported");
    Ok(())
}

fn build_workbook(report: &Report) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let style = report.header_style();
    let mut header_format = Format::new();
    if style.bold {
        header_format = header_format.set_bold();
    }
    if style.centered {
        header_format = header_format.set_align(FormatAlign::Center);
    }

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET_NAME)?;

    let mut column_formats = Vec::with_capacity(report.columns().len());
    for (index, column) in report.columns().iter().enumerate() {
        let col = index as u16;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;
        worksheet.set_column_width(col, column.width as f64)?;
        column_formats.push(match (column.kind, column.num_format()) {
            (ColumnKind::Money, Some(num_format)) => Some(Format::new().set_num_format(num_format)),
            _ => None,
        });
    }

    for (index, values) in report.rows().iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, value) in values.iter().enumerate() {
            let format = column_formats.get(col).and_then(Option::as_ref);
            let col = col as u16;
            match (value, format) {
                (ReportValue::Text(text), _) => {
                    worksheet.write_string(row, col, text)?;
                }
                (ReportValue::Money(amount), Some(format)) => {
                    worksheet.write_number_with_format(
                        row,
                        col,
                        amount.to_f64().unwrap_or_default(),
                        format,
                    )?;
                }
                (ReportValue::Money(amount), None) => {
                    worksheet.write_number(row, col, amount.to_f64().unwrap_or_default())?;
                }
            }
        }
    }

    Ok(workbook)
}

fn write_error(path: &str, error: XlsxError) -> PayrollError {
    PayrollError::ExportWriteError {
        path: path.to_string(),
        message: error.to_string(),
    }
}
