// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The one response envelope every route uses.
//!
//! Success bodies are `{ "data": <payload> }`, failures are
//! `{ "error": "<message>" }`, and the HTTP status carries the primary
//! signal. Handlers return `Result<_, ApiError>` and let `?` do the mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use chairside_core::ChairsideError;

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// The route's payload.
    pub data: T,
}

/// Failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error description.
    pub error: String,
}

/// Body returned by every create route.
#[derive(Debug, Serialize)]
pub struct CreatedBody {
    /// The newly assigned identifier.
    pub id: i64,
}

/// Wrap a payload in the success envelope.
pub fn data<T: Serialize>(value: T) -> Json<Envelope<T>> {
    Json(Envelope { data: value })
}

/// 201 response carrying the new record's id.
pub fn created(id: i64) -> Response {
    (StatusCode::CREATED, data(CreatedBody { id })).into_response()
}

/// Handler-boundary error: translates [`ChairsideError`] into a status plus
/// the error envelope.
///
/// Store failures are logged with context here and returned to the caller as
/// a generic message, so backend details never leak over the wire.
#[derive(Debug)]
pub struct ApiError(pub ChairsideError);

impl From<ChairsideError> for ApiError {
    fn from(err: ChairsideError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Shorthand for a 400 naming the offending field.
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self(ChairsideError::validation(field, message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ChairsideError::Validation { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ChairsideError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            ChairsideError::PayloadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.0.to_string())
            }
            ChairsideError::Storage { source } => {
                tracing::error!(error = %source, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            }
            ChairsideError::Config(detail) | ChairsideError::Internal(detail) => {
                tracing::error!(error = %detail, "unexpected failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
