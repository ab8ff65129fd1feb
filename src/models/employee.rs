//! Employee identity and roster models.
//!
//! This module defines the [`EmployeeId`] key used to reconcile the three
//! payroll inputs and the [`EmployeeRosterEntry`] row of the base salary table.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable identifier for an employee across all payroll inputs.
///
/// Spreadsheet cells may hold the identifier as text or as a number, so the
/// identifier is normalised into its canonical string form when it is read.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::EmployeeId;
///
/// let id = EmployeeId::new("E1");
/// assert_eq!(id.as_str(), "E1");
/// assert_eq!(id.to_string(), "E1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One row of the base salary roster.
///
/// The roster is authoritative for payroll membership: every roster entry
/// produces exactly one salary result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRosterEntry {
    /// Unique identifier for the employee.
    pub employee_id: EmployeeId,
    /// Display name of the employee.
    pub employee_name: String,
    /// Monthly salary for full attendance.
    pub base_salary: Decimal,
}
