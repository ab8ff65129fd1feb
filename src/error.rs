//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can stop a payroll run. All variants are
//! terminal: each one describes a deterministic defect in the inputs or the
//! configuration, so nothing in the engine retries.

use thiserror::Error;

use crate::models::InputKind;

/// The main error type for the payroll engine.
///
/// Every operation in the engine returns this error type. Callers that need
/// to branch on the failure programmatically can match on the variant or use
/// [`PayrollError::kind`] for a stable string code.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::ConfigurationError {
///     message: "working_days must be positive, got 0".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid configuration: working_days must be positive, got 0"
/// );
/// assert_eq!(error.kind(), "CONFIGURATION_ERROR");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// An input table could not be read as a spreadsheet.
    #[error("Failed to read {input} table from '{path}': {message}")]
    SourceReadError {
        /// Which of the three inputs failed.
        input: InputKind,
        /// The path that was being read.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// An input table is missing required columns.
    #[error("{input} table is missing required columns: {}", .missing.join(", "))]
    SchemaError {
        /// Which of the three inputs is missing columns.
        input: InputKind,
        /// The missing column names, sorted.
        missing: Vec<String>,
    },

    /// A cell in an input table holds a value of the wrong shape.
    #[error("Invalid value in {input} table at row {row}, column '{column}': {message}")]
    InvalidValue {
        /// Which of the three inputs holds the value.
        input: InputKind,
        /// The 1-based spreadsheet row (the header is row 1).
        row: usize,
        /// The column holding the value.
        column: String,
        /// A description of what was wrong with the value.
        message: String,
    },

    /// An employee identifier appears more than once in a keyed input.
    #[error("Duplicate employee_id '{employee_id}' in {input} table")]
    DuplicateEmployee {
        /// The input containing the duplicate.
        input: InputKind,
        /// The duplicated identifier.
        employee_id: String,
    },

    /// An amount left the representable decimal range during computation.
    #[error("Amount overflow computing {field} for employee '{employee_id}'")]
    AmountOverflow {
        /// The employee whose amounts overflowed.
        employee_id: String,
        /// The value being computed.
        field: &'static str,
    },

    /// The attendance date window is invalid or inverted.
    #[error("Invalid date range: {message}")]
    DateRangeError {
        /// A description of the problem with the window.
        message: String,
    },

    /// A tunable such as `working_days` has an invalid value.
    #[error("Invalid configuration: {message}")]
    ConfigurationError {
        /// A description of the invalid setting.
        message: String,
    },

    /// A record handed to the exporter lacks one of the report's values.
    #[error("Export record {row} is missing required values: {}", .missing.join(", "))]
    ExportSchemaError {
        /// The 0-based index of the offending record.
        row: usize,
        /// The names of the missing values.
        missing: Vec<String>,
    },

    /// The report could not be written to its destination.
    #[error("Failed to write report to '{path}': {message}")]
    ExportWriteError {
        /// The destination path.
        path: String,
        /// A description of the write failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A persistence collaborator failed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

impl PayrollError {
    /// Returns a stable, machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PayrollError::SourceReadError { .. } => "SOURCE_READ_ERROR",
            PayrollError::SchemaError { .. } => "SCHEMA_ERROR",
            PayrollError::InvalidValue { .. } => "INVALID_VALUE",
            PayrollError::DuplicateEmployee { .. } => "DUPLICATE_EMPLOYEE",
            PayrollError::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            PayrollError::DateRangeError { .. } => "DATE_RANGE_ERROR",
            PayrollError::ConfigurationError { .. } => "CONFIGURATION_ERROR",
            PayrollError::ExportSchemaError { .. } => "EXPORT_SCHEMA_ERROR",
            PayrollError::ExportWriteError { .. } => "EXPORT_WRITE_ERROR",
            PayrollError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            PayrollError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            PayrollError::StorageError { .. } => "STORAGE_ERROR",
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_read_error_displays_input_and_path() {
        let error = PayrollError::SourceReadError {
            input: InputKind::Attendance,
            path: "/uploads/attendance.xlsx".to_string(),
            message: "invalid zip header".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read attendance table from '/uploads/attendance.xlsx': invalid zip header"
        );
    }

    #[test]
    fn test_schema_error_lists_missing_columns() {
        let error = PayrollError::SchemaError {
            input: InputKind::Deductions,
            missing: vec!["goods".to_string(), "other_expenses".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "deductions table is missing required columns: goods, other_expenses"
        );
    }

    #[test]
    fn test_invalid_value_displays_position() {
        let error = PayrollError::InvalidValue {
            input: InputKind::Roster,
            row: 4,
            column: "base_salary".to_string(),
            message: "expected a number, got 'abc'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value in base salary table at row 4, column 'base_salary': expected a number, got 'abc'"
        );
    }

    #[test]
    fn test_duplicate_employee_displays_id() {
        let error = PayrollError::DuplicateEmployee {
            input: InputKind::Roster,
            employee_id: "E1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Duplicate employee_id 'E1' in base salary table"
        );
    }

    #[test]
    fn test_amount_overflow_names_employee_and_field() {
        let error = PayrollError::AmountOverflow {
            employee_id: "E1".to_string(),
            field: "gross_salary",
        };
        assert_eq!(
            error.to_string(),
            "Amount overflow computing gross_salary for employee 'E1'"
        );
        assert_eq!(error.kind(), "AMOUNT_OVERFLOW");
    }

    #[test]
    fn test_export_schema_error_lists_missing_values() {
        let error = PayrollError::ExportSchemaError {
            row: 2,
            missing: vec!["net_salary".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Export record 2 is missing required values: net_salary"
        );
    }

    #[test]
    fn test_kind_codes_are_distinct_per_taxonomy_entry() {
        let errors = [
            PayrollError::SourceReadError {
                input: InputKind::Roster,
                path: String::new(),
                message: String::new(),
            },
            PayrollError::SchemaError {
                input: InputKind::Roster,
                missing: vec![],
            },
            PayrollError::DateRangeError {
                message: String::new(),
            },
            PayrollError::ConfigurationError {
                message: String::new(),
            },
            PayrollError::ExportSchemaError {
                row: 0,
                missing: vec![],
            },
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_date_range_error() -> PayrollResult<()> {
            Err(PayrollError::DateRangeError {
                message: "start after end".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_date_range_error()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(PayrollError::DateRangeError { .. })
        ));
    }
}
