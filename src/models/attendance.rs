//! Attendance log models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// The attendance status recorded for an employee on a day.
///
/// Only the exact, case-sensitive literal `Present` counts towards
/// pro-ration. Every other value is kept verbatim as [`AttendanceStatus::Other`].
///
/// # Examples
///
/// ```
/// use payroll_engine::models::AttendanceStatus;
///
/// assert!(AttendanceStatus::parse("Present").is_present());
/// assert!(!AttendanceStatus::parse("present").is_present());
/// assert!(!AttendanceStatus::parse("Absent").is_present());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// The employee was present.
    Present,
    /// Any other recorded status (absent, leave, holiday, ...).
    Other(String),
}

impl AttendanceStatus {
    /// The literal status value that marks a present day.
    pub const PRESENT: &'static str = "Present";

    /// Classifies a raw status cell value.
    pub fn parse(value: &str) -> Self {
        if value == Self::PRESENT {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Other(value.to_string())
        }
    }

    /// Returns true if this status contributes to days present.
    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }
}

/// One row of the daily attendance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the row belongs to.
    pub employee_id: EmployeeId,
    /// The calendar date of the attendance entry.
    pub date: NaiveDate,
    /// The recorded status.
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_literal_is_present() {
        assert_eq!(AttendanceStatus::parse("Present"), AttendanceStatus::Present);
    }

    #[test]
    fn test_status_match_is_case_sensitive() {
        assert_eq!(
            AttendanceStatus::parse("PRESENT"),
            AttendanceStatus::Other("PRESENT".to_string())
        );
    }

    #[test]
    fn test_status_match_does_not_trim() {
        assert!(!AttendanceStatus::parse("Present ").is_present());
    }

    #[test]
    fn test_other_status_keeps_raw_value() {
        match AttendanceStatus::parse("Leave") {
            AttendanceStatus::Other(raw) => assert_eq!(raw, "Leave"),
            other => panic!("Expected Other, got {:?}", other),
        }
    }
}
