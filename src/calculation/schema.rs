//! Schema validation for the payroll inputs.
//!
//! This module checks that each input relation exposes its required column
//! set before any row of it is converted, aggregated or joined.

use tracing::warn;

use crate::error::{PayrollError, PayrollResult};
use crate::models::InputKind;
use crate::table::Table;

/// Required columns of the base salary roster.
pub const ROSTER_COLUMNS: [&str; 3] = ["employee_id", "employee_name", "base_salary"];

/// Required columns of the attendance log.
pub const ATTENDANCE_COLUMNS: [&str; 3] = ["employee_id", "date", "status"];

/// Required columns of the deduction ledger.
pub const DEDUCTION_COLUMNS: [&str; 4] = ["employee_id", "advance", "goods", "other_expenses"];

/// Returns the required column set for an input.
pub fn required_columns(kind: InputKind) -> &'static [&'static str] {
    match kind {
        InputKind::Roster => &ROSTER_COLUMNS,
        InputKind::Attendance => &ATTENDANCE_COLUMNS,
        InputKind::Deductions => &DEDUCTION_COLUMNS,
    }
}

/// Checks that a table exposes every column its input kind requires.
///
/// Extra columns are allowed and column order is irrelevant.
///
/// # Returns
///
/// Returns `SchemaError` naming the input and the sorted list of missing
/// columns.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_columns;
/// use payroll_engine::error::PayrollError;
/// use payroll_engine::models::InputKind;
/// use payroll_engine::table::Table;
///
/// let table = Table::from_rows(InputKind::Deductions, vec!["Employee_ID", "Advance"], vec![]);
/// match validate_columns(&table) {
///     Err(PayrollError::SchemaError { missing, .. }) => {
///         assert_eq!(missing, vec!["goods", "other_expenses"]);
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn validate_columns(table: &Table) -> PayrollResult<()> {
    let kind = table.kind();
    let mut missing: Vec<String> = required_columns(kind)
        .iter()
        .filter(|column| !table.has_column(column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    missing.sort();
    warn!(input = %kind, missing = ?missing, "Input table is missing required columns");
    Err(PayrollError::SchemaError {
        input: kind,
        missing,
    })
}

/// Validates all three inputs, failing on the first defective one.
///
/// Inputs are checked in pipeline order (roster, attendance, deductions).
pub fn validate_inputs(roster: &Table, attendance: &Table, deductions: &Table) -> PayrollResult<()> {
    validate_columns(roster)?;
    validate_columns(attendance)?;
    validate_columns(deductions)?;
    Ok(())
}

/// Returns the index of a required column, or `SchemaError` if it is absent.
pub(crate) fn column_index(table: &Table, name: &str) -> PayrollResult<usize> {
    table
        .column_index(name)
        .ok_or_else(|| PayrollError::SchemaError {
            input: table.kind(),
            missing: vec![name.to_string()],
        })
}
