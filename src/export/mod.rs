//! Report export for accounting import.
//!
//! This module renders salary results into the fixed five-column report
//! layout and writes it as a styled single-sheet workbook.
//!
//! # Example
//!
//! ```
//! use payroll_engine::export::render_report;
//! use payroll_engine::models::{EmployeeId, SalaryResult};
//! use rust_decimal::Decimal;
//!
//! let results = vec![SalaryResult {
//!     employee_id: EmployeeId::from("E2"),
//!     employee_name: "Bob".to_string(),
//!     days_present: 30,
//!     attendance_factor: Decimal::ONE,
//!     gross_salary: Decimal::new(2000, 0),
//!     total_deductions: Decimal::new(175, 0),
//!     net_salary: Decimal::new(1825, 0),
//! }];
//!
//! let report = render_report(&results).unwrap();
//! assert_eq!(report.columns()[2].header, "Amount (Net Salary)");
//! assert_eq!(report.rows()[0][2].rendered(), "1,825.00");
//! ```

mod report;
mod writer;

pub use report::{
    COLUMN_MARGIN, ColumnKind, HeaderStyle, MONEY_DECIMAL_PLACES, MONEY_FORMAT, Report,
    ReportColumn, ReportRecord, ReportValue, render_report, round_money,
};
pub use writer::{REPORT_SHEET_NAME, export_report, write_report};
