//! Typed extraction of validated input tables.
//!
//! Each function converts one relation into its typed rows, reporting
//! malformed cells with their spreadsheet position. The roster and the
//! deduction ledger are keyed by employee and reject duplicate identifiers.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, DeductionEntry, EmployeeId, EmployeeRosterEntry, InputKind,
};
use crate::table::{Row, Table};

use super::schema::{column_index, validate_columns};

/// Converts a roster table into roster entries, in sheet order.
///
/// # Returns
///
/// Returns an error if:
/// - A required column is missing (`SchemaError`)
/// - An id, name or salary cell is missing or malformed (`InvalidValue`)
/// - A base salary is negative (`InvalidValue`)
/// - An employee id appears twice (`DuplicateEmployee`)
pub fn roster_entries(table: &Table) -> PayrollResult<Vec<EmployeeRosterEntry>> {
    validate_columns(table)?;
    let id_col = column_index(table, "employee_id")?;
    let name_col = column_index(table, "employee_name")?;
    let salary_col = column_index(table, "base_salary")?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(table.len());

    for row in table.rows() {
        let employee_id = read_id(table, row, id_col)?;
        ensure_unique(table.kind(), &mut seen, &employee_id)?;

        let employee_name = row.cell(name_col).text().ok_or_else(|| {
            invalid(table, row, name_col, "employee name is missing".to_string())
        })?;

        let base_salary = read_amount(table, row, salary_col)?.ok_or_else(|| {
            invalid(table, row, salary_col, "base salary is missing".to_string())
        })?;

        entries.push(EmployeeRosterEntry {
            employee_id,
            employee_name,
            base_salary,
        });
    }

    Ok(entries)
}

/// Converts an attendance table into attendance records, in sheet order.
///
/// Every row's date is parsed, whether or not a date window is applied
/// later. A blank status is kept as a non-present status.
pub fn attendance_records(table: &Table) -> PayrollResult<Vec<AttendanceRecord>> {
    validate_columns(table)?;
    let id_col = column_index(table, "employee_id")?;
    let date_col = column_index(table, "date")?;
    let status_col = column_index(table, "status")?;

    table
        .rows()
        .iter()
        .map(|row| {
            let employee_id = read_id(table, row, id_col)?;
            let date = row
                .cell(date_col)
                .date()
                .map_err(|message| invalid(table, row, date_col, message))?;
            let status =
                AttendanceStatus::parse(&row.cell(status_col).text().unwrap_or_default());
            Ok(AttendanceRecord {
                employee_id,
                date,
                status,
            })
        })
        .collect()
}

/// Converts a deduction table into deduction entries, in sheet order.
///
/// Blank amount cells count as zero.
pub fn deduction_entries(table: &Table) -> PayrollResult<Vec<DeductionEntry>> {
    validate_columns(table)?;
    let id_col = column_index(table, "employee_id")?;
    let advance_col = column_index(table, "advance")?;
    let goods_col = column_index(table, "goods")?;
    let other_col = column_index(table, "other_expenses")?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(table.len());

    for row in table.rows() {
        let employee_id = read_id(table, row, id_col)?;
        ensure_unique(table.kind(), &mut seen, &employee_id)?;

        entries.push(DeductionEntry {
            employee_id,
            advance: read_amount(table, row, advance_col)?.unwrap_or(Decimal::ZERO),
            goods: read_amount(table, row, goods_col)?.unwrap_or(Decimal::ZERO),
            other_expenses: read_amount(table, row, other_col)?.unwrap_or(Decimal::ZERO),
        });
    }

    Ok(entries)
}

fn read_id(table: &Table, row: &Row, col: usize) -> PayrollResult<EmployeeId> {
    row.cell(col)
        .employee_id()
        .map_err(|message| invalid(table, row, col, message))
}

fn read_amount(table: &Table, row: &Row, col: usize) -> PayrollResult<Option<Decimal>> {
    let amount = row
        .cell(col)
        .decimal()
        .map_err(|message| invalid(table, row, col, message))?;
    match amount {
        Some(value) if value.is_sign_negative() && !value.is_zero() => Err(invalid(
            table,
            row,
            col,
            format!("amount {} must not be negative", value),
        )),
        other => Ok(other),
    }
}

fn ensure_unique(
    input: InputKind,
    seen: &mut HashSet<EmployeeId>,
    employee_id: &EmployeeId,
) -> PayrollResult<()> {
    if !seen.insert(employee_id.clone()) {
        return Err(PayrollError::DuplicateEmployee {
            input,
            employee_id: employee_id.to_string(),
        });
    }
    Ok(())
}

fn invalid(table: &Table, row: &Row, col: usize, message: String) -> PayrollError {
    PayrollError::InvalidValue {
        input: table.kind(),
        row: row.number,
        column: table.columns()[col].clone(),
        message,
    }
}
