// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin request handlers. Mounted behind the bearer token middleware.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use salon_booking::{ImageUpload, MonthView, StatsReport};
use salon_core::{NewCategory, Role, ServiceDraft};

use crate::error::ApiError;
use crate::handlers::{MonthQuery, requested_month};
use crate::server::AppState;

/// Response body for routes that create a record.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Query string of `PUT /v1/admin/services/{id}/image`.
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    /// File extension of the uploaded picture (`jpg`, `png`, ...).
    pub ext: String,
}

/// GET /v1/admin/appointments?month=YYYY-MM
pub async fn list_appointments(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<MonthView>, ApiError> {
    let Query(query) = query?;
    let month = requested_month(&state, query)?;
    Ok(Json(state.admin.list_month(month, Role::Admin).await?))
}

/// GET /v1/admin/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsReport>, ApiError> {
    Ok(Json(state.admin.dashboard().await?))
}

/// POST /v1/admin/appointments/{id}/confirm
pub async fn confirm_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.admin.confirm(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/admin/appointments/{id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.admin.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(category) = body?;
    let id = state.catalog.create_category(&category).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// DELETE /v1/admin/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/admin/services
///
/// Creates the service without a picture; upload one with the image route.
pub async fn create_service(
    State(state): State<AppState>,
    body: Result<Json<ServiceDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(draft) = body?;
    let id = state.catalog.create_service(&draft, None).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /v1/admin/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<ServiceDraft>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(draft) = body?;
    state.catalog.update_service(id, &draft, None).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/admin/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /v1/admin/services/{id}/image?ext=jpg
///
/// The raw request body is the picture.
pub async fn replace_service_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    query: Result<Query<ImageQuery>, QueryRejection>,
    bytes: Bytes,
) -> Result<StatusCode, ApiError> {
    let Query(query) = query?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("image body is empty".to_string()));
    }
    let upload = ImageUpload {
        bytes: bytes.to_vec(),
        ext: query.ext,
    };
    state.catalog.replace_service_image(id, upload).await?;
    Ok(StatusCode::NO_CONTENT)
}
