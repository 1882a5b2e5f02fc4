use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::codes::ErrorCode;
use super::param::ParamError;

/// Structured error returned by handlers and rendered to clients.
///
/// Fields are private: once built through one of the constructors below the
/// value is never mutated, only read, rendered, or passed along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StructuredError {
    /// HTTP status code of the response
    #[serde(default, skip_serializing_if = "is_zero")]
    #[schema(example = 404)]
    status: u16,
    /// Error code for programmatic handling
    #[serde(default, skip_serializing_if = "ErrorCode::is_empty")]
    #[schema(value_type = String, example = "NotFound")]
    code: ErrorCode,
    /// Human-readable error message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    message: String,
    /// Per-field validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ParamError>,
}

fn is_zero(status: &u16) -> bool {
    *status == 0
}

impl StructuredError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: code.status_code(),
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Status as an HTTP status code; values outside the valid range map to 500
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[ParamError] {
        &self.errors
    }
}

/// Helpers for the fixed error categories
impl StructuredError {
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServerInternalError, message)
    }

    pub fn internal_exception(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalException, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExists, message)
    }

    /// 400 with a caller-chosen code, for categories the vocabulary lacks
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST.as_u16(),
            code: ErrorCode::from(code.into()),
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// A single invalid field
    pub fn invalid_param(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::invalid_params([ParamError::invalid(field, message)])
    }

    /// Several invalid fields, kept in the order given
    pub fn invalid_params(params: impl IntoIterator<Item = ParamError>) -> Self {
        Self {
            errors: params.into_iter().collect(),
            ..Self::new(ErrorCode::InvalidParams, String::new())
        }
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::error::Error for StructuredError {}

/// Write `body` as JSON under `status`.
///
/// # Panics
///
/// Panics when `body` cannot be encoded; the recovery layer answers that
/// with a generic 500.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let body = match serde_json::to_vec(body) {
        Ok(body) => body,
        Err(e) => panic!("failed to encode error response: {}", e),
    };

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

impl IntoResponse for StructuredError {
    fn into_response(self) -> Response {
        let mut response = json_response(self.status_code(), &self);
        response.extensions_mut().insert(self.code);
        response
    }
}
