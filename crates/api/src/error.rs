use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prsk_core::error::CoreError;
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `prsk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Request body failed shape validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// One offending field in an error response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    Vec::new(),
                ),
                CoreError::ReferenceNotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "REFERENCE_NOT_FOUND",
                    format!("Referenced {entity} with id {id} not found"),
                    Vec::new(),
                ),
                CoreError::DuplicateKey { entity, fields, .. } => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    core.to_string(),
                    fields
                        .iter()
                        .map(|field| ErrorDetail {
                            field: (*field).to_string(),
                            message: format!("already used by another {entity}"),
                        })
                        .collect(),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    Vec::new(),
                ),
                CoreError::Storage(err) => {
                    tracing::error!(error = %err, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        Vec::new(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Request validation failed".to_string(),
                validation_details(errors),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                msg.clone(),
                Vec::new(),
            ),
        };

        let body = if details.is_empty() {
            json!({
                "error": message,
                "code": code,
            })
        } else {
            json!({
                "error": message,
                "code": code,
                "details": details,
            })
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Flatten `validator` errors into one detail per failed rule, ordered by field.
fn validation_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| ErrorDetail {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", err.code)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}
