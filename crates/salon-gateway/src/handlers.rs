// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public request handlers: health, catalog, calendar, booking and contact.

use axum::{
    Json,
    extract::{Query, State, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use salon_booking::{BookingOutcome, BookingRequest, ContactForm, LocalizedCategory, MonthView, parse_month};
use salon_core::{HealthStatus, Locale, Role};

use crate::error::ApiError;
use crate::server::AppState;

/// Query string of `GET /v1/catalog`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub locale: Locale,
}

/// Query string of the month calendar routes.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`; the current month when absent.
    #[serde(default)]
    pub month: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` or `unhealthy`.
    pub status: String,
    /// Binary version.
    pub version: String,
    pub uptime_secs: u64,
    pub adapters: Vec<AdapterHealth>,
}

/// Health of one collaborator.
#[derive(Debug, Serialize)]
pub struct AdapterHealth {
    pub name: String,
    pub status: String,
}

/// Response body for POST /v1/contact.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub sent: bool,
}

/// Resolve the `month` parameter against the gateway clock.
pub(crate) fn requested_month(
    state: &AppState,
    query: MonthQuery,
) -> Result<chrono::NaiveDate, ApiError> {
    match query.month {
        Some(month) => Ok(parse_month(&month)?),
        None => Ok(state.clock.now().date()),
    }
}

/// GET /health
///
/// Probes every collaborator once. Unhealthy collaborators turn the
/// response into a 503.
pub async fn get_health(State(state): State<AppState>) -> Response {
    let mut adapters: Vec<AdapterHealth> = Vec::new();
    let mut overall = "ok";

    for adapter in &state.health.adapters {
        // The SQLite store serves both store traits; probe it once.
        if adapters.iter().any(|a| a.name == adapter.name()) {
            continue;
        }
        let status = match adapter.health_check().await {
            Ok(HealthStatus::Healthy) => "healthy".to_string(),
            Ok(HealthStatus::Degraded(reason)) => {
                if overall == "ok" {
                    overall = "degraded";
                }
                format!("degraded: {reason}")
            }
            Ok(HealthStatus::Unhealthy(reason)) => {
                overall = "unhealthy";
                format!("unhealthy: {reason}")
            }
            Err(e) => {
                overall = "unhealthy";
                format!("unhealthy: {e}")
            }
        };
        adapters.push(AdapterHealth {
            name: adapter.name().to_string(),
            status,
        });
    }

    let code = if overall == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    let body = HealthResponse {
        status: overall.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        adapters,
    };
    (code, Json(body)).into_response()
}

/// GET /v1/catalog?locale=es|en
pub async fn get_catalog(
    State(state): State<AppState>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<Vec<LocalizedCategory>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.catalog.catalog(query.locale).await?))
}

/// GET /v1/appointments?month=YYYY-MM
///
/// Busy slots only; customer details never leave the server here.
pub async fn get_appointments(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<MonthView>, ApiError> {
    let Query(query) = query?;
    let month = requested_month(&state, query)?;
    Ok(Json(state.admin.list_month(month, Role::Public).await?))
}

/// POST /v1/appointments
pub async fn post_appointment(
    State(state): State<AppState>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingOutcome>), ApiError> {
    let Json(request) = body?;
    let outcome = state.booking.book(&request).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// POST /v1/contact
pub async fn post_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(form) = body?;
    state.contact.contact(&form).await?;
    Ok(Json(ContactResponse { sent: true }))
}
