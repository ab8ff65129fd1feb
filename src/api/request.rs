//! Request types for the payroll API.
//!
//! This module defines the JSON request structure for the `/payroll`
//! endpoint and its conversion into pipeline options.

use serde::{Deserialize, Serialize};

use crate::calculation::PayrollOptions;
use crate::error::{PayrollError, PayrollResult};
use crate::models::InputKind;

/// Request body for the `/payroll` endpoint.
///
/// File names refer to workbooks already placed in the service's upload
/// directory. Any directory components are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The base salary roster workbook.
    #[serde(default)]
    pub base_salary_file: Option<String>,
    /// The attendance log workbook.
    #[serde(default)]
    pub attendance_file: Option<String>,
    /// The deduction ledger workbook.
    #[serde(default)]
    pub deductions_file: Option<String>,
    /// Working days in the period; the service default when absent.
    #[serde(default)]
    pub working_days: Option<i64>,
    /// First day of the attendance window (ISO date).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of the attendance window (ISO date).
    #[serde(default)]
    pub end_date: Option<String>,
}

impl PayrollRequest {
    /// Builds pipeline options from the request.
    ///
    /// # Returns
    ///
    /// Returns `DateRangeError` if only one of `start_date` and `end_date`
    /// is given.
    pub fn options(&self, default_working_days: i64) -> PayrollResult<PayrollOptions> {
        let window = match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => Some((start.clone(), end.clone())),
            (None, None) => None,
            _ => {
                return Err(PayrollError::DateRangeError {
                    message: "start_date and end_date must be given together".to_string(),
                });
            }
        };
        Ok(PayrollOptions {
            working_days: self.working_days.unwrap_or(default_working_days),
            window,
        })
    }

    /// Returns the file name given for an input.
    pub fn file(&self, kind: InputKind) -> Option<&str> {
        match kind {
            InputKind::Roster => self.base_salary_file.as_deref(),
            InputKind::Attendance => self.attendance_file.as_deref(),
            InputKind::Deductions => self.deductions_file.as_deref(),
        }
    }

    /// Sets the file name for an input.
    pub fn set_file(&mut self, kind: InputKind, name: String) {
        let slot = match kind {
            InputKind::Roster => &mut self.base_salary_file,
            InputKind::Attendance => &mut self.attendance_file,
            InputKind::Deductions => &mut self.deductions_file,
        };
        *slot = Some(name);
    }

    /// Returns the three file fields in pipeline order.
    pub fn files(&self) -> [(InputKind, Option<&str>); 3] {
        InputKind::ALL.map(|kind| (kind, self.file(kind)))
    }
}
