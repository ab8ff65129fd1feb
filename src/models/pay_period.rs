//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: the inclusive date window a
//! payroll run covers. It doubles as the attendance filter and as the period
//! recorded alongside persisted results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// The ISO calendar date format accepted for window bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar date window.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::parse("2025-08-01", "2025-08-31").unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap())); // start date
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap())); // end date
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())); // after
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a period from two dates.
    ///
    /// # Returns
    ///
    /// Returns `DateRangeError` if `start_date` is after `end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> PayrollResult<Self> {
        if start_date > end_date {
            return Err(PayrollError::DateRangeError {
                message: format!(
                    "start date {} is after end date {}",
                    start_date, end_date
                ),
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parses a period from two ISO `YYYY-MM-DD` strings.
    ///
    /// # Arguments
    ///
    /// * `start` - The first day of the window
    /// * `end` - The last day of the window
    ///
    /// # Returns
    ///
    /// Returns `DateRangeError` if either bound is not a valid calendar date
    /// or if the window is inverted.
    pub fn parse(start: &str, end: &str) -> PayrollResult<Self> {
        let start_date = parse_bound("start", start)?;
        let end_date = parse_bound("end", end)?;
        Self::new(start_date, end_date)
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

fn parse_bound(name: &str, value: &str) -> PayrollResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        PayrollError::DateRangeError {
            message: format!("{} date '{}' is not a valid calendar date: {}", name, value, e),
        }
    })
}
