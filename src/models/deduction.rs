//! Deduction ledger models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

use super::EmployeeId;

/// One row of the deduction ledger.
///
/// An employee without a ledger row has no deductions for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionEntry {
    /// The employee the deductions apply to.
    pub employee_id: EmployeeId,
    /// Salary advance already paid out.
    pub advance: Decimal,
    /// Goods taken against salary.
    pub goods: Decimal,
    /// Any other recoverable expenses.
    pub other_expenses: Decimal,
}

impl DeductionEntry {
    /// Returns the sum of all deduction amounts.
    ///
    /// Fails with `AmountOverflow` if the sum leaves the decimal range.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{DeductionEntry, EmployeeId};
    /// use rust_decimal::Decimal;
    ///
    /// let entry = DeductionEntry {
    ///     employee_id: EmployeeId::from("E2"),
    ///     advance: Decimal::new(100, 0),
    ///     goods: Decimal::new(50, 0),
    ///     other_expenses: Decimal::new(25, 0),
    /// };
    /// assert_eq!(entry.total()?, Decimal::new(175, 0));
    /// # Ok::<(), payroll_engine::error::PayrollError>(())
    /// ```
    pub fn total(&self) -> PayrollResult<Decimal> {
        self.advance
            .checked_add(self.goods)
            .and_then(|sum| sum.checked_add(self.other_expenses))
            .ok_or_else(|| PayrollError::AmountOverflow {
                employee_id: self.employee_id.to_string(),
                field: "total_deductions",
            })
    }
}
