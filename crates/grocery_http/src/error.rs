//! Transport-level error mapping.
//!
//! # Responsibility
//! - Translate every service/storage outcome into a defined HTTP status.
//!
//! # Invariants
//! - The mapping is exhaustive: no domain error escapes as an unhandled fault.
//! - Extractor rejections share the JSON error shape of domain errors.
//! - 5xx bodies carry a fixed message; details only reach the log.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use grocery_core::db::DbError;
use grocery_core::ServiceError;
use log::{error, warn};
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    /// 409: another product already uses the name.
    DuplicateName(String),
    /// 400: required fields missing or blank.
    Validation(String),
    /// 400: malformed request not covered by extractor rejections.
    BadRequest(String),
    /// 404 with an empty body.
    NotFound,
    /// 500: database could not be opened or a query failed. Holds the
    /// detail for the log, not for the client.
    Storage(String),
    /// 500: the blocking worker died. Logged detail only.
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::DuplicateName(_) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code carried in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "duplicate_name",
            Self::Validation(_) => "validation_failed",
            Self::BadRequest(_) => "bad_request",
            Self::NotFound => "not_found",
            Self::Storage(_) => "storage_failure",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message placed in the response body.
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) => "storage failure".to_string(),
            Self::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "Product found with name: {name}"),
            Self::Validation(message)
            | Self::BadRequest(message)
            | Self::Storage(message)
            | Self::Internal(message) => write!(f, "{message}"),
            Self::NotFound => write!(f, "product not found"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::DuplicateName(name) => Self::DuplicateName(name),
            ServiceError::Validation(err) => Self::Validation(err.to_string()),
            err @ ServiceError::MissingId => Self::BadRequest(err.to_string()),
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Storage(err) => Self::Storage(err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::JsonDataError(err) => Self::Validation(err.body_text()),
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=http status=error code={} error={}",
                self.code(),
                self
            );
        } else {
            warn!(
                "event=http_error module=http status=rejected code={} error={}",
                self.code(),
                self
            );
        }

        if matches!(self, Self::NotFound) {
            return status.into_response();
        }

        let body = ErrorBody {
            error: self.code(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
