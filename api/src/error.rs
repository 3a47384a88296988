//! Unified error types for the customer registry API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)
//!
//! Every failure leaves the API as the same JSON envelope, `ApiErrorBody`.
//! The request path is filled in by `middleware::stamp_error_path`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single offending request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{resource} not found with {field}: '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation errors: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(
        resource: &'static str,
        field: &'static str,
        value: impl std::fmt::Display,
    ) -> Self {
        DomainError::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Malformed request: {0}")]
    MalformedPayload(String),

    #[error("No route for the requested path")]
    RouteNotFound,

    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

/// Error response body shared by every failing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

const REDACTED_MESSAGE: &str = "An unexpected error occurred";

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Domain(e @ DomainError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Not Found", e.to_string())
            }
            AppError::Domain(DomainError::Validation(violations)) => (
                StatusCode::BAD_REQUEST,
                "Validation Failed",
                format!("Invalid fields: {}", join_violations(violations)),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    REDACTED_MESSAGE.to_string(),
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    REDACTED_MESSAGE.to_string(),
                )
            }
            AppError::MalformedPayload(msg) => (
                StatusCode::BAD_REQUEST,
                "Malformed Request",
                format!("The request could not be read: {}", msg),
            ),
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "Not Found",
                "No resource exists at this path".to_string(),
            ),
            AppError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed",
                format!("Method {} is not supported for this path", method),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();

        let body = ApiErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.to_string(),
            message,
            path: String::new(),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}
