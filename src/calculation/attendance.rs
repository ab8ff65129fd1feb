//! Attendance aggregation.
//!
//! This module reduces the per-day attendance log to a per-employee count of
//! present days, optionally restricted to an inclusive date window.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{AttendanceRecord, EmployeeId, PayPeriod};

/// Present-day counts per employee for one payroll run.
///
/// Employees with no qualifying rows never enter the map; [`days_present`]
/// reports zero for them.
///
/// [`days_present`]: AttendanceSummary::days_present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    counts: HashMap<EmployeeId, u32>,
}

impl AttendanceSummary {
    /// Returns the number of present days for an employee, zero if unknown.
    pub fn days_present(&self, employee_id: &EmployeeId) -> u32 {
        self.counts.get(employee_id).copied().unwrap_or(0)
    }

    /// Returns the number of employees with at least one present day.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no employee has a present day.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over the employees that have at least one present day.
    pub fn iter(&self) -> impl Iterator<Item = (&EmployeeId, u32)> {
        self.counts.iter().map(|(id, count)| (id, *count))
    }
}

/// Counts `Present` days per employee.
///
/// Rows outside `window` (when given) are ignored, as are rows whose status
/// is anything other than the exact literal `Present`. The records are only
/// borrowed; the caller's attendance log is never modified.
///
/// # Arguments
///
/// * `records` - The attendance log
/// * `window` - Optional inclusive date window
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_attendance;
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus, EmployeeId, PayPeriod};
/// use chrono::NaiveDate;
///
/// let records = vec![
///     AttendanceRecord {
///         employee_id: EmployeeId::from("E1"),
///         date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
///         status: AttendanceStatus::Present,
///     },
///     AttendanceRecord {
///         employee_id: EmployeeId::from("E1"),
///         date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
///         status: AttendanceStatus::Present,
///     },
/// ];
///
/// let august = PayPeriod::parse("2025-08-01", "2025-08-31").unwrap();
/// let summary = aggregate_attendance(&records, Some(&august));
/// assert_eq!(summary.days_present(&EmployeeId::from("E1")), 1);
/// assert_eq!(summary.days_present(&EmployeeId::from("E9")), 0);
/// ```
pub fn aggregate_attendance(
    records: &[AttendanceRecord],
    window: Option<&PayPeriod>,
) -> AttendanceSummary {
    let mut counts: HashMap<EmployeeId, u32> = HashMap::new();
    let mut out_of_window = 0usize;

    for record in records {
        if let Some(period) = window {
            if !period.contains_date(record.date) {
                out_of_window += 1;
                continue;
            }
        }
        if record.status.is_present() {
            *counts.entry(record.employee_id.clone()).or_insert(0) += 1;
        }
    }

    debug!(
        records = records.len(),
        out_of_window,
        employees = counts.len(),
        "Aggregated attendance"
    );

    AttendanceSummary { counts }
}
