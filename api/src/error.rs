//! Unified error types for the Agora API
//!
//! This module defines error types for each layer:
//! - `HarnessError`: Failures raised by the persistence and identity substitutes
//! - `AppError`: Application layer errors (wraps harness errors for HTTP responses)
//! - `ConfigError`: Invalid sandbox configuration

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::Entity;

/// Errors produced by the harness layer.
///
/// `Clone` because a query result is shared between every awaiter of the
/// same query handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("no behavior configured for {entity}.{operation}")]
    UnconfiguredBehavior { entity: Entity, operation: String },

    /// A configured behavior failed on purpose, standing in for a
    /// persistence failure.
    #[error("operation rejected: {0}")]
    Rejected(String),
}

impl HarnessError {
    /// Shorthand for a simulated persistence failure
    pub fn rejected(message: impl Into<String>) -> Self {
        HarnessError::Rejected(message.into())
    }
}

/// Sandbox configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Harness(#[from] HarnessError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Harness(HarnessError::InvalidToken(_)) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", None)
            }
            AppError::Harness(e @ HarnessError::UnconfiguredBehavior { .. }) => {
                tracing::error!("Harness configuration gap: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Harness(HarnessError::Rejected(msg)) => {
                tracing::error!("Persistence error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
