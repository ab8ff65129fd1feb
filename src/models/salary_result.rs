//! Salary result model.
//!
//! This module contains the [`SalaryResult`] type, the canonical per-employee
//! record produced by the computation engine and consumed by the exporter and
//! the persistence collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// The computed salary for one rostered employee.
///
/// All monetary values keep full decimal precision. Rounding to cents happens
/// only when the result is rendered into a report.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EmployeeId, SalaryResult};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = SalaryResult {
///     employee_id: EmployeeId::from("E1"),
///     employee_name: "Alice".to_string(),
///     days_present: 15,
///     attendance_factor: Decimal::from_str("0.5").unwrap(),
///     gross_salary: Decimal::from_str("1500").unwrap(),
///     total_deductions: Decimal::ZERO,
///     net_salary: Decimal::from_str("1500").unwrap(),
/// };
/// assert!(!result.is_net_negative());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// The employee this result is for.
    pub employee_id: EmployeeId,
    /// The employee's display name, taken from the roster.
    pub employee_name: String,
    /// Number of `Present` days counted in the run.
    pub days_present: u32,
    /// `days_present / working_days`; may exceed one.
    pub attendance_factor: Decimal,
    /// Base salary pro-rated by the attendance factor.
    pub gross_salary: Decimal,
    /// Sum of advance, goods and other expenses.
    pub total_deductions: Decimal,
    /// Gross salary less total deductions; may be negative.
    pub net_salary: Decimal,
}

impl SalaryResult {
    /// Returns true if deductions exceed gross salary.
    pub fn is_net_negative(&self) -> bool {
        self.net_salary.is_sign_negative() && !self.net_salary.is_zero()
    }
}
