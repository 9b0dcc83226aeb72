// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of service errors to JSON HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use salon_core::{FieldError, SalonError};

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
    /// Per-field failures of a rejected form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Salon(#[from] SalonError),

    /// The request could not be decoded.
    #[error("invalid request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Salon(err) => match err {
                SalonError::Validation(_)
                | SalonError::InvalidInterval { .. }
                | SalonError::SlotUnavailable(_) => StatusCode::BAD_REQUEST,
                SalonError::SlotConflict { .. } => StatusCode::CONFLICT,
                SalonError::NotFound { .. } => StatusCode::NOT_FOUND,
                SalonError::Config(_)
                | SalonError::Storage { .. }
                | SalonError::Notification { .. }
                | SalonError::ImageStore { .. }
                | SalonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Server-side details stay in the log.
            tracing::error!(error = %self, "request failed");
            ErrorResponse {
                error: "internal error".to_string(),
                fields: Vec::new(),
            }
        } else {
            let fields = match &self {
                ApiError::Salon(SalonError::Validation(fields)) => fields.clone(),
                _ => Vec::new(),
            };
            ErrorResponse {
                error: self.to_string(),
                fields,
            }
        };
        (status, Json(body)).into_response()
    }
}
