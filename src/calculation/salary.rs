//! Salary computation.
//!
//! This module joins the roster with the attendance summary and the
//! deduction ledger and derives gross salary, total deductions and net
//! salary for every rostered employee.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{DeductionEntry, EmployeeId, EmployeeRosterEntry, SalaryResult};

use super::AttendanceSummary;

/// The nominal number of working days in a pay period.
pub const DEFAULT_WORKING_DAYS: i64 = 30;

/// Checks that `working_days` is usable as a pro-ration divisor.
///
/// # Returns
///
/// Returns `ConfigurationError` if `working_days` is zero or negative.
pub fn validate_working_days(working_days: i64) -> PayrollResult<u32> {
    if working_days <= 0 {
        return Err(PayrollError::ConfigurationError {
            message: format!("working_days must be positive, got {}", working_days),
        });
    }
    u32::try_from(working_days).map_err(|_| PayrollError::ConfigurationError {
        message: format!("working_days is too large, got {}", working_days),
    })
}

/// Computes one salary result per roster entry.
///
/// The roster drives the output: results follow roster order, and rows in
/// the attendance summary or deduction ledger for employees outside the
/// roster are ignored. An employee with no present days gets a zero
/// attendance factor; an employee without a deduction row has zero
/// deductions.
///
/// Values keep full precision. The attendance factor is not capped, so a
/// `working_days` smaller than the days actually worked yields a gross
/// salary above the base salary.
///
/// # Arguments
///
/// * `roster` - The roster entries, one per employee
/// * `attendance` - Present-day counts from [`aggregate_attendance`](super::aggregate_attendance)
/// * `deductions` - The deduction entries, at most one per employee
/// * `working_days` - The nominal working days in the period
///
/// # Returns
///
/// Returns `ConfigurationError` if `working_days` is not positive; no
/// results are produced in that case.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{AttendanceSummary, compute_salaries};
/// use payroll_engine::models::{EmployeeId, EmployeeRosterEntry};
/// use rust_decimal::Decimal;
///
/// let roster = vec![EmployeeRosterEntry {
///     employee_id: EmployeeId::from("E1"),
///     employee_name: "Alice".to_string(),
///     base_salary: Decimal::new(3000, 0),
/// }];
///
/// let results = compute_salaries(&roster, &AttendanceSummary::default(), &[], 30).unwrap();
/// assert_eq!(results[0].days_present, 0);
/// assert_eq!(results[0].gross_salary, Decimal::ZERO);
/// ```
pub fn compute_salaries(
    roster: &[EmployeeRosterEntry],
    attendance: &AttendanceSummary,
    deductions: &[DeductionEntry],
    working_days: i64,
) -> PayrollResult<Vec<SalaryResult>> {
    let working_days = Decimal::from(validate_working_days(working_days)?);

    let deductions_by_id: HashMap<&EmployeeId, &DeductionEntry> = deductions
        .iter()
        .map(|entry| (&entry.employee_id, entry))
        .collect();

    let results = roster
        .iter()
        .map(|entry| -> PayrollResult<SalaryResult> {
            let days_present = attendance.days_present(&entry.employee_id);
            let days = Decimal::from(days_present);
            let overflow = |field: &'static str| PayrollError::AmountOverflow {
                employee_id: entry.employee_id.to_string(),
                field,
            };

            let attendance_factor = days
                .checked_div(working_days)
                .ok_or_else(|| overflow("attendance_factor"))?;
            // Multiplying first keeps thirds exact; the factor form only
            // serves salaries too large for the intermediate product.
            let gross_salary = entry
                .base_salary
                .checked_mul(days)
                .and_then(|amount| amount.checked_div(working_days))
                .or_else(|| entry.base_salary.checked_mul(attendance_factor))
                .ok_or_else(|| overflow("gross_salary"))?;

            let total_deductions = match deductions_by_id.get(&entry.employee_id) {
                Some(deduction) => deduction.total()?,
                None => Decimal::ZERO,
            };
            let net_salary = gross_salary
                .checked_sub(total_deductions)
                .ok_or_else(|| overflow("net_salary"))?;

            Ok(SalaryResult {
                employee_id: entry.employee_id.clone(),
                employee_name: entry.employee_name.clone(),
                days_present,
                attendance_factor,
                gross_salary,
                total_deductions,
                net_salary,
            })
        })
        .collect::<PayrollResult<Vec<_>>>()?;

    let rostered: std::collections::HashSet<&EmployeeId> =
        roster.iter().map(|entry| &entry.employee_id).collect();
    let unmatched_attendance = attendance
        .iter()
        .filter(|(id, _)| !rostered.contains(id))
        .count();
    let unmatched_deductions = deductions
        .iter()
        .filter(|entry| !rostered.contains(&entry.employee_id))
        .count();
    if unmatched_attendance > 0 || unmatched_deductions > 0 {
        debug!(
            unmatched_attendance,
            unmatched_deductions, "Ignored rows for employees outside the roster"
        );
    }

    for result in results.iter().filter(|r| r.is_net_negative()) {
        warn!(
            employee_id = %result.employee_id,
            net_salary = %result.net_salary,
            "Deductions exceed gross salary"
        );
    }

    info!(
        employees = results.len(),
        working_days = %working_days,
        "Salary computation completed"
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::aggregate_attendance;
    use crate::models::{AttendanceRecord, AttendanceStatus};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, name: &str, salary: &str) -> EmployeeRosterEntry {
        EmployeeRosterEntry {
            employee_id: EmployeeId::from(id),
            employee_name: name.to_string(),
            base_salary: dec(salary),
        }
    }

    fn present_days(id: &str, days: u32) -> Vec<AttendanceRecord> {
        (1..=days)
            .map(|day| AttendanceRecord {
                employee_id: EmployeeId::from(id),
                date: NaiveDate::from_ymd_opt(2025, 8, day).unwrap(),
                status: AttendanceStatus::Present,
            })
            .collect()
    }

    fn deduction(id: &str, advance: &str, goods: &str, other: &str) -> DeductionEntry {
        DeductionEntry {
            employee_id: EmployeeId::from(id),
            advance: dec(advance),
            goods: dec(goods),
            other_expenses: dec(other),
        }
    }

    #[test]
    fn test_half_attendance_halves_salary() {
        let roster = vec![employee("E1", "Alice", "3000")];
        let summary = aggregate_attendance(&present_days("E1", 15), None);

        let results = compute_salaries(&roster, &summary, &[], 30).unwrap();

        let alice = &results[0];
        assert_eq!(alice.days_present, 15);
        assert_eq!(alice.attendance_factor, dec("0.5"));
        assert_eq!(alice.gross_salary, dec("1500"));
        assert_eq!(alice.total_deductions, Decimal::ZERO);
        assert_eq!(alice.net_salary, dec("1500"));
    }

    #[test]
    fn test_absent_employee_defaults_to_zero() {
        let roster = vec![employee("E1", "Alice", "3000"), employee("E3", "Cara", "2500")];
        let summary = aggregate_attendance(&present_days("E1", 10), None);

        let results = compute_salaries(&roster, &summary, &[], 30).unwrap();

        let cara = &results[1];
        assert_eq!(cara.days_present, 0);
        assert_eq!(cara.attendance_factor, Decimal::ZERO);
        assert_eq!(cara.gross_salary, Decimal::ZERO);
        assert_eq!(cara.net_salary, Decimal::ZERO);
    }

    #[test]
    fn test_deductions_are_summed_and_subtracted() {
        let roster = vec![employee("E2", "Bob", "2000")];
        let summary = aggregate_attendance(&present_days("E2", 30), None);
        let deductions = vec![deduction("E2", "100", "50", "25")];

        let results = compute_salaries(&roster, &summary, &deductions, 30).unwrap();

        let bob = &results[0];
        assert_eq!(bob.attendance_factor, dec("1"));
        assert_eq!(bob.gross_salary, dec("2000"));
        assert_eq!(bob.total_deductions, dec("175"));
        assert_eq!(bob.net_salary, dec("1825"));
    }

    #[test]
    fn test_net_salary_may_go_negative() {
        let roster = vec![employee("E2", "Bob", "2000")];
        let deductions = vec![deduction("E2", "500", "0", "0")];

        let results =
            compute_salaries(&roster, &AttendanceSummary::default(), &deductions, 30).unwrap();

        assert_eq!(results[0].net_salary, dec("-500"));
    }

    #[test]
    fn test_factor_above_one_is_not_capped() {
        let roster = vec![employee("E1", "Alice", "2000")];
        let summary = aggregate_attendance(&present_days("E1", 25), None);

        let results = compute_salaries(&roster, &summary, &[], 20).unwrap();

        assert_eq!(results[0].attendance_factor, dec("1.25"));
        assert_eq!(results[0].gross_salary, dec("2500"));
    }

    #[test]
    fn test_thirds_keep_exact_gross() {
        let roster = vec![employee("E1", "Alice", "3000")];
        let summary = aggregate_attendance(&present_days("E1", 10), None);

        let results = compute_salaries(&roster, &summary, &[], 30).unwrap();

        assert_eq!(results[0].gross_salary, dec("1000"));
        assert!(results[0].attendance_factor > dec("0.3333"));
        assert!(results[0].attendance_factor < dec("0.3334"));
    }

    #[test]
    fn test_full_precision_is_retained() {
        let roster = vec![employee("E1", "Alice", "3650.01")];
        let summary = aggregate_attendance(&present_days("E1", 15), None);

        let results = compute_salaries(&roster, &summary, &[], 30).unwrap();

        assert_eq!(results[0].gross_salary, dec("1825.005"));
        assert_eq!(results[0].net_salary, dec("1825.005"));
    }

    #[test]
    fn test_membership_follows_roster_only() {
        let roster = vec![employee("E2", "Bob", "2000"), employee("E1", "Alice", "3000")];
        let mut records = present_days("E1", 5);
        records.extend(present_days("GHOST", 5));
        let summary = aggregate_attendance(&records, None);
        let deductions = vec![deduction("OUTSIDER", "10", "10", "10")];

        let results = compute_salaries(&roster, &summary, &deductions, 30).unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E1"]);
    }

    #[test]
    fn test_salary_too_large_for_intermediate_product_still_computes() {
        let roster = vec![employee("E1", "Alice", "50000000000000000000000000000")];
        let summary = aggregate_attendance(&present_days("E1", 15), None);

        let results = compute_salaries(&roster, &summary, &[], 30).unwrap();

        assert_eq!(results[0].gross_salary, dec("25000000000000000000000000000"));
    }

    #[test]
    fn test_gross_beyond_decimal_range_is_overflow_error() {
        let roster = vec![EmployeeRosterEntry {
            employee_id: EmployeeId::from("E1"),
            employee_name: "Alice".to_string(),
            base_salary: Decimal::MAX,
        }];
        let summary = aggregate_attendance(&present_days("E1", 25), None);

        match compute_salaries(&roster, &summary, &[], 20) {
            Err(PayrollError::AmountOverflow { employee_id, field }) => {
                assert_eq!(employee_id, "E1");
                assert_eq!(field, "gross_salary");
            }
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_deduction_overflow_fails_the_run() {
        let roster = vec![employee("E2", "Bob", "2000")];
        let deductions = vec![deduction(
            "E2",
            "40000000000000000000000000000",
            "40000000000000000000000000000",
            "0",
        )];

        let result = compute_salaries(&roster, &AttendanceSummary::default(), &deductions, 30);

        assert!(matches!(
            result,
            Err(PayrollError::AmountOverflow {
                field: "total_deductions",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_working_days_is_rejected() {
        let roster = vec![employee("E1", "Alice", "3000")];
        let result = compute_salaries(&roster, &AttendanceSummary::default(), &[], 0);
        assert!(matches!(
            result,
            Err(PayrollError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_negative_working_days_is_rejected() {
        let roster = vec![employee("E1", "Alice", "3000")];
        match compute_salaries(&roster, &AttendanceSummary::default(), &[], -5) {
            Err(PayrollError::ConfigurationError { message }) => {
                assert!(message.contains("-5"));
            }
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_roster_yields_empty_results() {
        let results = compute_salaries(&[], &AttendanceSummary::default(), &[], 30).unwrap();
        assert!(results.is_empty());
    }
}
