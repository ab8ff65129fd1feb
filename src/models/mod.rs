//! Core data models for the payroll engine.
//!
//! This module contains the typed rows of the three payroll inputs and the
//! [`SalaryResult`] produced for every rostered employee.

mod attendance;
mod deduction;
mod employee;
mod input;
mod pay_period;
mod salary_result;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use deduction::DeductionEntry;
pub use employee::{EmployeeId, EmployeeRosterEntry};
pub use input::InputKind;
pub use pay_period::{DATE_FORMAT, PayPeriod};
pub use salary_result::SalaryResult;
