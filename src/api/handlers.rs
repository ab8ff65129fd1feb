//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::path::Path;
use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Multipart, Path as UrlPath, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollSources, compute_payroll};
use crate::error::PayrollError;
use crate::export::export_report;
use crate::models::InputKind;

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse, PayrollResponse};
use super::state::AppState;

/// Content type of generated reports.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Request body limit for multipart uploads of the three workbooks.
pub const UPLOAD_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .route(
            "/payroll/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/outputs/:filename", get(download_handler))
        .route("/results", get(results_handler))
        .with_state(state)
}

/// Reduces a client-supplied file name to its final path component.
///
/// Returns `None` for names that have no usable final component, such as
/// `..` or a bare directory.
fn secure_filename(name: &str) -> Option<String> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::trim)
        .filter(|n| !n.is_empty() && !n.starts_with('.'))
        .map(str::to_string)
}

/// Handler for POST /payroll.
///
/// Runs the payroll over workbooks already present in the upload
/// directory, named in a JSON body.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    run_payroll(&state, correlation_id, Uuid::new_v4(), request).await
}

/// One workbook part of a multipart upload.
struct Upload {
    kind: InputKind,
    filename: String,
    bytes: Bytes,
}

/// Handler for POST /payroll/upload.
///
/// Accepts the three workbooks as multipart file parts named after their
/// request fields, plus optional `working_days`, `start_date` and
/// `end_date` text parts. Every file is checked before any is saved; saved
/// files carry the run id so concurrent uploads never share a path.
async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll upload");

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Multipart rejection"
            );
            return ApiErrorResponse::bad_request(ApiError::invalid_upload(rejection.body_text()))
                .into_response();
        }
    };

    let (mut request, uploads) = match read_upload_form(&mut multipart).await {
        Ok(form) => form,
        Err(api_error) => return error_response(correlation_id, api_error),
    };

    let config = state.config();
    let mut accepted = Vec::with_capacity(uploads.len());
    for kind in InputKind::ALL {
        let label = kind.upload_label();
        let Some(upload) = uploads
            .iter()
            .find(|upload| upload.kind == kind && !upload.filename.trim().is_empty())
        else {
            warn!(correlation_id = %correlation_id, file = label, "Missing upload");
            return ApiErrorResponse::bad_request(ApiError::missing_file(label)).into_response();
        };
        match secure_filename(&upload.filename) {
            Some(name) if config.is_allowed_file(&name) => accepted.push((kind, name, upload)),
            _ => {
                warn!(
                    correlation_id = %correlation_id,
                    file = label,
                    filename = %upload.filename,
                    "Rejected upload"
                );
                return ApiErrorResponse::bad_request(ApiError::invalid_file_type(
                    label,
                    &upload.filename,
                ))
                .into_response();
            }
        }
    }

    let run_id = Uuid::new_v4();
    if let Err(err) = tokio::fs::create_dir_all(&config.upload_dir).await {
        return upload_write_failed(correlation_id, &config.upload_dir, err);
    }
    for (kind, name, upload) in accepted {
        let stored_name = format!("{}_{}", run_id.simple(), name);
        let path = config.upload_dir.join(&stored_name);
        if let Err(err) = tokio::fs::write(&path, &upload.bytes).await {
            return upload_write_failed(correlation_id, &path, err);
        }
        info!(
            correlation_id = %correlation_id,
            input = %kind,
            bytes = upload.bytes.len(),
            stored_as = %stored_name,
            "Saved upload"
        );
        request.set_file(kind, stored_name);
    }

    run_payroll(&state, correlation_id, run_id, request).await
}

/// Reads every part of an upload form.
///
/// File parts are collected by input; text parts fill the run options.
/// Unknown parts are ignored.
async fn read_upload_form(
    multipart: &mut Multipart,
) -> Result<(PayrollRequest, Vec<Upload>), ApiErrorResponse> {
    let invalid =
        |err: MultipartError| ApiErrorResponse::bad_request(ApiError::invalid_upload(err.body_text()));

    let mut request = PayrollRequest::default();
    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(kind) = InputKind::from_field_name(&name) {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(invalid)?;
            uploads.push(Upload {
                kind,
                filename,
                bytes,
            });
            continue;
        }

        let text = field.text().await.map_err(invalid)?;
        let value = text.trim();
        if value.is_empty() {
            continue;
        }
        match name.as_str() {
            "working_days" => {
                let working_days = value.parse::<i64>().map_err(|_| {
                    ApiErrorResponse::from(PayrollError::ConfigurationError {
                        message: format!("working_days must be an integer, got '{}'", value),
                    })
                })?;
                request.working_days = Some(working_days);
            }
            "start_date" => request.start_date = Some(value.to_string()),
            "end_date" => request.end_date = Some(value.to_string()),
            _ => {}
        }
    }
    Ok((request, uploads))
}

fn upload_write_failed(correlation_id: Uuid, path: &Path, err: std::io::Error) -> Response {
    warn!(
        correlation_id = %correlation_id,
        path = %path.display(),
        error = %err,
        "Failed to save upload"
    );
    ApiErrorResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        error: ApiError::new("UPLOAD_WRITE_ERROR", "Uploaded file could not be saved"),
    }
    .into_response()
}

/// Resolves the request's workbooks in the upload directory, runs the
/// payroll, writes the run's report and stores its results.
async fn run_payroll(
    state: &AppState,
    correlation_id: Uuid,
    run_id: Uuid,
    request: PayrollRequest,
) -> Response {
    let config = state.config();
    let mut paths = Vec::with_capacity(3);
    for (kind, file) in request.files() {
        let label = kind.upload_label();
        let Some(file) = file.filter(|f| !f.trim().is_empty()) else {
            warn!(correlation_id = %correlation_id, file = label, "Missing upload");
            return ApiErrorResponse::bad_request(ApiError::missing_file(label)).into_response();
        };
        let name = match secure_filename(file) {
            Some(name) if config.is_allowed_file(&name) => name,
            _ => {
                warn!(
                    correlation_id = %correlation_id,
                    file = label,
                    filename = file,
                    "Rejected upload"
                );
                return ApiErrorResponse::bad_request(ApiError::invalid_file_type(label, file))
                    .into_response();
            }
        };
        paths.push(config.upload_dir.join(name));
    }
    let [roster, attendance, deductions]: [_; 3] = match paths.try_into() {
        Ok(paths) => paths,
        Err(_) => {
            return ApiErrorResponse::bad_request(ApiError::malformed_json(
                "Expected three input files",
            ))
            .into_response();
        }
    };
    let sources = PayrollSources {
        roster,
        attendance,
        deductions,
    };

    let options = match request.options(config.default_working_days) {
        Ok(options) => options,
        Err(err) => return error_response(correlation_id, err.into()),
    };
    let period = match options.period() {
        Ok(period) => period,
        Err(err) => return error_response(correlation_id, err.into()),
    };

    let start_time = Instant::now();
    let report_path = config.report_path(run_id);
    let outcome = tokio::task::spawn_blocking(move || {
        let results = compute_payroll(&sources, &options)?;
        export_report(&results, &report_path)?;
        Ok::<_, PayrollError>(results)
    })
    .await;

    let results = match outcome {
        Ok(Ok(results)) => results,
        Ok(Err(err)) => return error_response(correlation_id, err.into()),
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Payroll task failed"
            );
            return ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTERNAL_ERROR", "Payroll computation did not complete"),
            }
            .into_response();
        }
    };

    if let Err(err) = state.store().save_run(run_id, period.as_ref(), &results) {
        return error_response(correlation_id, err.into());
    }

    info!(
        correlation_id = %correlation_id,
        run_id = %run_id,
        employees = results.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll completed successfully"
    );

    let response = PayrollResponse {
        run_id,
        results,
        output_url: format!("/outputs/{}", config.report_filename(run_id)),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for GET /outputs/:filename.
///
/// Serves a generated report from the output directory as an attachment.
async fn download_handler(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
) -> Response {
    let not_found = || {
        ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::file_not_found(&filename),
        }
        .into_response()
    };

    let Some(name) = secure_filename(&filename) else {
        return not_found();
    };
    let path = state.config().output_dir.join(&name);

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            info!(filename = %name, bytes = bytes.len(), "Serving report");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", name),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(filename = %name, error = %err, "Report not available");
            not_found()
        }
    }
}

/// Handler for GET /results.
///
/// Lists every stored salary record, oldest run first.
async fn results_handler(State(state): State<AppState>) -> Response {
    match state.store().list() {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => {
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

fn error_response(correlation_id: Uuid, api_error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Payroll request failed"
    );
    api_error.into_response()
}
