//! API error types

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contract_core_api::error::CoreError;
use contract_core_db::store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Field-level failures, keyed by dotted document path.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),

    #[error("term policy violation: {0}")]
    TermPolicy(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    /// Present on validation failures only: path -> message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(fields) => ApiError::Validation(fields),
            CoreError::TermPolicy(msg) => ApiError::TermPolicy(msg),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::InvalidTransition(msg) => ApiError::Conflict(msg),
            CoreError::MalformedPayload(msg) => ApiError::BadRequest(msg),
            CoreError::Path(e) => ApiError::BadRequest(e.to_string()),
            CoreError::Schema(msg) | CoreError::Render(msg) | CoreError::Storage(msg) => {
                ApiError::Internal(msg)
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::from(CoreError::from(e))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, errors) in e.field_errors() {
            if let Some(first) = errors.first() {
                let message = first
                    .message
                    .clone()
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| first.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        ApiError::Validation(fields)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                format!("validation failed for {} field(s)", errors.len()),
                Some(errors),
            ),
            ApiError::TermPolicy(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "TERM_POLICY", msg, None)
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg, None)
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
