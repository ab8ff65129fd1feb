//! The payroll computation entry point.
//!
//! Chains the loader, the schema validator, the attendance aggregator and
//! the salary engine. A run either returns the complete result set or fails
//! at the first detected error.

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PayrollResult;
use crate::models::{InputKind, PayPeriod, SalaryResult};
use crate::table::{Table, load_table};

use super::records::{attendance_records, deduction_entries, roster_entries};
use super::salary::{DEFAULT_WORKING_DAYS, validate_working_days};
use super::{aggregate_attendance, compute_salaries, validate_inputs};

/// Locations of the three payroll inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSources {
    /// The base salary roster workbook.
    pub roster: PathBuf,
    /// The attendance log workbook.
    pub attendance: PathBuf,
    /// The deduction ledger workbook.
    pub deductions: PathBuf,
}

/// Tunables for one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollOptions {
    /// The nominal working days in the period.
    pub working_days: i64,
    /// Optional inclusive `(start, end)` window as ISO dates.
    pub window: Option<(String, String)>,
}

impl Default for PayrollOptions {
    fn default() -> Self {
        Self {
            working_days: DEFAULT_WORKING_DAYS,
            window: None,
        }
    }
}

impl PayrollOptions {
    /// Parses the date window, if one was supplied.
    ///
    /// # Returns
    ///
    /// Returns `DateRangeError` if either bound is invalid or the window is
    /// inverted.
    pub fn period(&self) -> PayrollResult<Option<PayPeriod>> {
        self.window
            .as_ref()
            .map(|(start, end)| PayPeriod::parse(start, end))
            .transpose()
    }
}

/// Computes salaries from three spreadsheet files.
///
/// Options are validated before any file is opened; all three schemas are
/// validated before any row is converted.
///
/// # Arguments
///
/// * `sources` - Paths of the roster, attendance and deduction workbooks
/// * `options` - Working days and optional date window
///
/// # Returns
///
/// Returns the salary results in roster order, or the first error among
/// `ConfigurationError`, `DateRangeError`, `SourceReadError`, `SchemaError`,
/// `InvalidValue`, `DuplicateEmployee` and `AmountOverflow`.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::calculation::{PayrollOptions, PayrollSources, compute_payroll};
///
/// let sources = PayrollSources {
///     roster: "uploads/base_salary.xlsx".into(),
///     attendance: "uploads/attendance.xlsx".into(),
///     deductions: "uploads/deductions.xlsx".into(),
/// };
/// let options = PayrollOptions {
///     working_days: 30,
///     window: Some(("2025-08-01".to_string(), "2025-08-31".to_string())),
/// };
/// let results = compute_payroll(&sources, &options)?;
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
pub fn compute_payroll(
    sources: &PayrollSources,
    options: &PayrollOptions,
) -> PayrollResult<Vec<SalaryResult>> {
    validate_working_days(options.working_days)?;
    options.period()?;

    let roster = load_table(&sources.roster, InputKind::Roster)?;
    let attendance = load_table(&sources.attendance, InputKind::Attendance)?;
    let deductions = load_table(&sources.deductions, InputKind::Deductions)?;

    compute_from_tables(&roster, &attendance, &deductions, options)
}

/// Computes salaries from three already-loaded tables.
///
/// The tables are only borrowed, so a caller may reuse them across runs.
pub fn compute_from_tables(
    roster: &Table,
    attendance: &Table,
    deductions: &Table,
    options: &PayrollOptions,
) -> PayrollResult<Vec<SalaryResult>> {
    let start_time = Instant::now();
    validate_working_days(options.working_days)?;
    let period = options.period()?;

    validate_inputs(roster, attendance, deductions)?;

    let roster = roster_entries(roster)?;
    let attendance = attendance_records(attendance)?;
    let deductions = deduction_entries(deductions)?;

    if let Some(period) = &period {
        info!(
            start_date = %period.start_date,
            end_date = %period.end_date,
            "Filtering attendance by date window"
        );
    }
    let summary = aggregate_attendance(&attendance, period.as_ref());
    let results = compute_salaries(&roster, &summary, &deductions, options.working_days)?;

    info!(
        employees = results.len(),
        attendance_rows = attendance.len(),
        deduction_rows = deductions.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Payroll run completed"
    );
    Ok(results)
}
