//! Calculation logic for the payroll engine.
//!
//! This module contains the stages of a payroll run: schema validation of
//! the input tables, typed extraction of their rows, attendance aggregation
//! with optional date windowing, salary computation, and the pipeline entry
//! point that chains them.

mod attendance;
mod pipeline;
mod records;
mod salary;
mod schema;

pub use attendance::{AttendanceSummary, aggregate_attendance};
pub use pipeline::{PayrollOptions, PayrollSources, compute_from_tables, compute_payroll};
pub use records::{attendance_records, deduction_entries, roster_entries};
pub use salary::{DEFAULT_WORKING_DAYS, compute_salaries, validate_working_days};
pub use schema::{
    ATTENDANCE_COLUMNS, DEDUCTION_COLUMNS, ROSTER_COLUMNS, required_columns, validate_columns,
    validate_inputs,
};
