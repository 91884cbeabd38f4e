use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use folio_core::CoreError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid admin token.
    Auth(String),
    /// Wrong username or password; the client may retry this many times.
    InvalidCredentials { remaining_attempts: u32 },
    /// The client is blocked from logging in.
    TooManyAttempts {
        retry_after: Duration,
        /// Present only on the attempt that triggered the block.
        block_duration_ms: Option<u64>,
    },
    Validation(Vec<String>),
    NotFound(String),
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_duration_ms: Option<u64>,
}

impl ErrorBody {
    fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            blocked: None,
            remaining_attempts: None,
            block_duration_ms: None,
        }
    }
}

/// Whole minutes, rounded up, for user-facing messages.
fn minutes_ceil(d: Duration) -> u64 {
    d.as_secs().div_ceil(60).max(1)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(msg) => {
                (StatusCode::UNAUTHORIZED, axum::Json(ErrorBody::message(msg))).into_response()
            }
            AppError::InvalidCredentials { remaining_attempts } => {
                let body = ErrorBody {
                    remaining_attempts: Some(remaining_attempts),
                    ..ErrorBody::message("Invalid credentials")
                };
                (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
            }
            AppError::TooManyAttempts {
                retry_after,
                block_duration_ms,
            } => {
                let body = ErrorBody {
                    blocked: Some(true),
                    remaining_attempts: Some(0),
                    block_duration_ms,
                    ..ErrorBody::message(format!(
                        "Too many failed login attempts. Try again in {} minutes.",
                        minutes_ceil(retry_after)
                    ))
                };
                let mut response =
                    (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
                let secs = retry_after.as_secs().max(1);
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(secs));
                response
            }
            AppError::Validation(errors) => {
                let body = ErrorBody {
                    errors: Some(errors),
                    ..ErrorBody::message("Validation failed")
                };
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, axum::Json(ErrorBody::message(msg))).into_response()
            }
            AppError::Internal(msg) => {
                // Log the real error server-side, return generic message to client
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(ErrorBody::message("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => AppError::Validation(vec![msg]),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {rejection}");
        AppError::Validation(vec![rejection.body_text()])
    }
}
