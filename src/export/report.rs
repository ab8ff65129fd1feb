//! Rendering of salary results into the fixed report layout.
//!
//! The report layout is independent of the field order of [`SalaryResult`]:
//! five columns in a fixed order, monetary values rounded to cents, and
//! column widths sized to their longest rendered value.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{PayrollError, PayrollResult};
use crate::models::SalaryResult;

/// Extra characters added to every column's width.
pub const COLUMN_MARGIN: usize = 2;

/// Number format applied to monetary columns.
pub const MONEY_FORMAT: &str = "#,##0.00";

/// Decimal places monetary values are rounded to on export.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Read access to the five values the report needs from a record.
///
/// [`SalaryResult`] always provides every value. Records reloaded from
/// storage may not, which is why each accessor is optional.
pub trait ReportRecord {
    /// The employee identifier.
    fn employee_id(&self) -> Option<&str>;
    /// The employee display name.
    fn employee_name(&self) -> Option<&str>;
    /// The net salary at full precision.
    fn net_salary(&self) -> Option<Decimal>;
    /// The total deductions at full precision.
    fn total_deductions(&self) -> Option<Decimal>;
    /// The gross salary at full precision.
    fn gross_salary(&self) -> Option<Decimal>;
}

impl ReportRecord for SalaryResult {
    fn employee_id(&self) -> Option<&str> {
        Some(self.employee_id.as_str())
    }

    fn employee_name(&self) -> Option<&str> {
        Some(&self.employee_name)
    }

    fn net_salary(&self) -> Option<Decimal> {
        Some(self.net_salary)
    }

    fn total_deductions(&self) -> Option<Decimal> {
        Some(self.total_deductions)
    }

    fn gross_salary(&self) -> Option<Decimal> {
        Some(self.gross_salary)
    }
}

/// How a column's values are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Plain text.
    Text,
    /// A currency amount displayed with [`MONEY_FORMAT`].
    Money,
}

/// A column of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    /// The header text.
    pub header: &'static str,
    /// How the column's values are presented.
    pub kind: ColumnKind,
    /// Display width in characters, margin included.
    pub width: usize,
}

impl ReportColumn {
    /// Returns the number format of the column, if it has one.
    pub fn num_format(&self) -> Option<&'static str> {
        match self.kind {
            ColumnKind::Money => Some(MONEY_FORMAT),
            ColumnKind::Text => None,
        }
    }
}

/// Presentation of the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderStyle {
    /// Header cells are bold.
    pub bold: bool,
    /// Header cells are horizontally centred.
    pub centered: bool,
}

/// A single value in a report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportValue {
    /// A text value.
    Text(String),
    /// A monetary value, already rounded to cents.
    Money(Decimal),
}

impl ReportValue {
    /// Renders the value as it is displayed in the report.
    pub fn rendered(&self) -> String {
        match self {
            ReportValue::Text(s) => s.clone(),
            ReportValue::Money(amount) => format_money(*amount),
        }
    }
}

/// A rendered report, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    columns: Vec<ReportColumn>,
    header_style: HeaderStyle,
    rows: Vec<Vec<ReportValue>>,
}

impl Report {
    /// Returns the report columns in display order.
    pub fn columns(&self) -> &[ReportColumn] {
        &self.columns
    }

    /// Returns the header presentation.
    pub fn header_style(&self) -> HeaderStyle {
        self.header_style
    }

    /// Returns the data rows in input order.
    pub fn rows(&self) -> &[Vec<ReportValue>] {
        &self.rows
    }
}

const COLUMNS: [(&str, ColumnKind); 5] = [
    ("Employee ID", ColumnKind::Text),
    ("Employee Name", ColumnKind::Text),
    ("Amount (Net Salary)", ColumnKind::Money),
    ("Deductions", ColumnKind::Money),
    ("Gross Salary", ColumnKind::Money),
];

/// Rounds a monetary amount to cents, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::export::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("1825.005").unwrap();
/// assert_eq!(round_money(amount), Decimal::from_str("1825.01").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders records into the report layout.
///
/// Every record is checked before anything is rendered, so a defective
/// record never yields a partial report.
///
/// # Returns
///
/// Returns `ExportSchemaError` naming the first record that lacks any of
/// the five report values.
pub fn render_report<R: ReportRecord>(records: &[R]) -> PayrollResult<Report> {
    for (row, record) in records.iter().enumerate() {
        let missing = missing_values(record);
        if !missing.is_empty() {
            return Err(PayrollError::ExportSchemaError { row, missing });
        }
    }

    let rows: Vec<Vec<ReportValue>> = records
        .iter()
        .map(|record| {
            vec![
                ReportValue::Text(record.employee_id().unwrap_or_default().to_string()),
                ReportValue::Text(record.employee_name().unwrap_or_default().to_string()),
                ReportValue::Money(round_money(record.net_salary().unwrap_or_default())),
                ReportValue::Money(round_money(record.total_deductions().unwrap_or_default())),
                ReportValue::Money(round_money(record.gross_salary().unwrap_or_default())),
            ]
        })
        .collect();

    let columns = COLUMNS
        .iter()
        .enumerate()
        .map(|(index, (header, kind))| {
            let longest = rows
                .iter()
                .map(|row| row[index].rendered().chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            ReportColumn {
                header: *header,
                kind: *kind,
                width: longest + COLUMN_MARGIN,
            }
        })
        .collect();

    Ok(Report {
        columns,
        header_style: HeaderStyle {
            bold: true,
            centered: true,
        },
        rows,
    })
}

fn missing_values<R: ReportRecord>(record: &R) -> Vec<String> {
    let present = [
        ("employee_id", record.employee_id().is_some()),
        ("employee_name", record.employee_name().is_some()),
        ("net_salary", record.net_salary().is_some()),
        ("total_deductions", record.total_deductions().is_some()),
        ("gross_salary", record.gross_salary().is_some()),
    ];
    present
        .iter()
        .filter(|(_, is_present)| !is_present)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Formats a rounded amount the way [`MONEY_FORMAT`] displays it.
fn format_money(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn result(id: &str, name: &str, net: &str, deductions: &str, gross: &str) -> SalaryResult {
        SalaryResult {
            employee_id: EmployeeId::from(id),
            employee_name: name.to_string(),
            days_present: 30,
            attendance_factor: dec("1"),
            gross_salary: dec(gross),
            total_deductions: dec(deductions),
            net_salary: dec(net),
        }
    }

    struct PartialRecord {
        name: Option<String>,
        net: Option<Decimal>,
    }

    impl ReportRecord for PartialRecord {
        fn employee_id(&self) -> Option<&str> {
            Some("E9")
        }
        fn employee_name(&self) -> Option<&str> {
            self.name.as_deref()
        }
        fn net_salary(&self) -> Option<Decimal> {
            self.net
        }
        fn total_deductions(&self) -> Option<Decimal> {
            Some(Decimal::ZERO)
        }
        fn gross_salary(&self) -> Option<Decimal> {
            Some(Decimal::ZERO)
        }
    }

    #[test]
    fn test_header_order_is_fixed() {
        let report = render_report::<SalaryResult>(&[]).unwrap();
        let headers: Vec<&str> = report.columns().iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            vec![
                "Employee ID",
                "Employee Name",
                "Amount (Net Salary)",
                "Deductions",
                "Gross Salary"
            ]
        );
    }

    #[test]
    fn test_values_follow_header_order() {
        let report = render_report(&[result("E2", "Bob", "1825", "175", "2000")]).unwrap();
        assert_eq!(
            report.rows()[0],
            vec![
                ReportValue::Text("E2".to_string()),
                ReportValue::Text("Bob".to_string()),
                ReportValue::Money(dec("1825")),
                ReportValue::Money(dec("175")),
                ReportValue::Money(dec("2000")),
            ]
        );
    }

    #[test]
    fn test_rounding_happens_on_render_only() {
        let results = vec![result("E1", "Alice", "1825.005", "0", "1825.005")];

        let report = render_report(&results).unwrap();

        assert_eq!(report.rows()[0][2], ReportValue::Money(dec("1825.01")));
        assert_eq!(results[0].net_salary, dec("1825.005"));
    }

    #[test]
    fn test_negative_midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec("-10.125")), dec("-10.13"));
        assert_eq!(round_money(dec("10.124")), dec("10.12"));
    }

    #[test]
    fn test_money_columns_carry_number_format() {
        let report = render_report::<SalaryResult>(&[]).unwrap();
        let formats: Vec<Option<&str>> =
            report.columns().iter().map(|c| c.num_format()).collect();
        assert_eq!(
            formats,
            vec![None, None, Some(MONEY_FORMAT), Some(MONEY_FORMAT), Some(MONEY_FORMAT)]
        );
    }

    #[test]
    fn test_header_style_is_bold_and_centered() {
        let style = render_report::<SalaryResult>(&[]).unwrap().header_style();
        assert!(style.bold);
        assert!(style.centered);
    }

    #[test]
    fn test_widths_fit_longest_value_plus_margin() {
        let report = render_report(&[result(
            "E1",
            "Maximilian Alexander Hawthorne",
            "1234567.891",
            "0",
            "1234567.891",
        )])
        .unwrap();

        let columns = report.columns();
        // Header is longer than the data.
        assert_eq!(columns[0].width, "Employee ID".len() + COLUMN_MARGIN);
        // Data is longer than the header.
        assert_eq!(
            columns[1].width,
            "Maximilian Alexander Hawthorne".len() + COLUMN_MARGIN
        );
        assert_eq!(columns[4].width, "1,234,567.89".len() + COLUMN_MARGIN);
    }

    #[test]
    fn test_money_rendering_groups_thousands() {
        assert_eq!(ReportValue::Money(dec("1825.01")).rendered(), "1,825.01");
        assert_eq!(ReportValue::Money(dec("0")).rendered(), "0.00");
        assert_eq!(ReportValue::Money(dec("-500")).rendered(), "-500.00");
        assert_eq!(ReportValue::Money(dec("100")).rendered(), "100.00");
    }

    #[test]
    fn test_missing_value_is_export_schema_error() {
        let records = vec![
            PartialRecord {
                name: Some("Ok".to_string()),
                net: Some(Decimal::ONE),
            },
            PartialRecord {
                name: None,
                net: None,
            },
        ];

        match render_report(&records) {
            Err(PayrollError::ExportSchemaError { row, missing }) => {
                assert_eq!(row, 1);
                assert_eq!(missing, vec!["employee_name", "net_salary"]);
            }
            other => panic!("Expected ExportSchemaError, got {:?}", other),
        }
    }
}
