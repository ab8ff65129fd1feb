//! Response types for the payroll API.
//!
//! This module defines the success and error response structures and the
//! translation of engine errors into HTTP responses. The error code of every
//! engine failure is its [`PayrollError::kind`], so clients can branch on it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PayrollError;
use crate::models::SalaryResult;

/// Successful response of the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Identifier of the stored run.
    pub run_id: Uuid,
    /// The computed results, in roster order, at full precision.
    pub results: Vec<SalaryResult>,
    /// Where the generated report can be downloaded.
    pub output_url: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing upload error response.
    pub fn missing_file(label: &str) -> Self {
        Self::new("MISSING_FILE", format!("Missing file: {}", label))
    }

    /// Creates a rejected upload error response.
    pub fn invalid_file_type(label: &str, filename: &str) -> Self {
        Self::with_details(
            "INVALID_FILE_TYPE",
            format!("Invalid file type for {}", label),
            format!("'{}' does not have an accepted extension", filename),
        )
    }

    /// Creates an error response for a multipart body that cannot be read.
    pub fn invalid_upload(message: impl Into<String>) -> Self {
        Self::new("INVALID_UPLOAD", message)
    }

    /// Creates a not found error response for a generated file.
    pub fn file_not_found(filename: &str) -> Self {
        Self::new("FILE_NOT_FOUND", format!("File not found: {}", filename))
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let status = match &error {
            PayrollError::SourceReadError { .. }
            | PayrollError::SchemaError { .. }
            | PayrollError::InvalidValue { .. }
            | PayrollError::DuplicateEmployee { .. }
            | PayrollError::AmountOverflow { .. }
            | PayrollError::DateRangeError { .. }
            | PayrollError::ConfigurationError { .. } => StatusCode::BAD_REQUEST,
            PayrollError::ExportSchemaError { .. }
            | PayrollError::ExportWriteError { .. }
            | PayrollError::ConfigNotFound { .. }
            | PayrollError::ConfigParseError { .. }
            | PayrollError::StorageError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error = match &error {
            PayrollError::SourceReadError { input, .. } => ApiError::with_details(
                error.kind(),
                error.to_string(),
                format!("Re-upload the {} file as a valid spreadsheet", input),
            ),
            PayrollError::SchemaError { input, .. } => ApiError::with_details(
                error.kind(),
                error.to_string(),
                format!("Add the missing columns to the {} file's header row", input),
            ),
            _ => ApiError::new(error.kind(), error.to_string()),
        };

        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InputKind;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_missing_file_message() {
        let error = ApiError::missing_file("Attendance File");
        assert_eq!(error.code, "MISSING_FILE");
        assert_eq!(error.message, "Missing file: Attendance File");
    }

    #[test]
    fn test_schema_error_keeps_its_kind() {
        let api_error: ApiErrorResponse = PayrollError::SchemaError {
            input: InputKind::Roster,
            missing: vec!["base_salary".to_string()],
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "SCHEMA_ERROR");
        assert!(api_error.error.message.contains("base_salary"));
        assert!(api_error.error.details.is_some());
    }

    #[test]
    fn test_configuration_error_is_client_error() {
        let api_error: ApiErrorResponse = PayrollError::ConfigurationError {
            message: "working_days must be positive, got 0".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_export_failures_are_server_errors() {
        let api_error: ApiErrorResponse = PayrollError::ExportWriteError {
            path: "outputs/report.xlsx".to_string(),
            message: "permission denied".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "EXPORT_WRITE_ERROR");
    }
}
