// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use salon_booking::{AdminService, BookingService, CatalogService, ContactService, StatsAggregator};
use salon_config::SalonConfig;
use salon_config::model::ImagesConfig;
use salon_core::{
    Adapter, AppointmentStore, CatalogStore, Clock, ImageStore, Notifier, SalonError,
};

use crate::admin;
use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Largest accepted service picture.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
    /// Collaborators probed by `GET /health`.
    pub adapters: Vec<Arc<dyn Adapter>>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub booking: Arc<BookingService>,
    pub admin: Arc<AdminService>,
    pub catalog: Arc<CatalogService>,
    pub contact: Arc<ContactService>,
    pub clock: Arc<dyn Clock>,
    /// Authentication configuration for the admin routes.
    pub auth: AuthConfig,
    pub health: HealthState,
}

impl AppState {
    /// Wire every service from configuration and collaborators.
    pub fn new(
        config: &SalonConfig,
        appointments: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn CatalogStore>,
        notifier: Arc<dyn Notifier>,
        images: Arc<dyn ImageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let adapters = vec![
            appointments.clone() as Arc<dyn Adapter>,
            catalog.clone() as Arc<dyn Adapter>,
            notifier.clone() as Arc<dyn Adapter>,
            images.clone() as Arc<dyn Adapter>,
        ];
        Self {
            booking: Arc::new(BookingService::new(
                config,
                appointments.clone(),
                notifier.clone(),
                clock.clone(),
            )),
            admin: Arc::new(AdminService::new(
                appointments,
                clock.clone(),
                StatsAggregator::new(config.booking.week_start()),
            )),
            catalog: Arc::new(CatalogService::new(catalog, images, clock.clone())),
            contact: Arc::new(ContactService::new(
                notifier,
                config.salon.owner_email.clone(),
            )),
            clock,
            auth: AuthConfig {
                bearer_token: config.gateway.bearer_token.clone(),
            },
            health: HealthState {
                start_time: std::time::Instant::now(),
                adapters,
            },
        }
    }
}

/// Gateway server configuration (mirrors `GatewayConfig` from salon-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full router:
/// - `GET /health`, `GET /v1/catalog`, `GET|POST /v1/appointments`,
///   `POST /v1/contact` (public)
/// - everything under `/v1/admin` (bearer token)
pub fn build_router(state: AppState) -> Router {
    let auth_state = state.auth.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/v1/catalog", get(handlers::get_catalog))
        .route(
            "/v1/appointments",
            get(handlers::get_appointments).post(handlers::post_appointment),
        )
        .route("/v1/contact", post(handlers::post_contact))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/v1/admin/appointments", get(admin::list_appointments))
        .route("/v1/admin/stats", get(admin::get_stats))
        .route(
            "/v1/admin/appointments/{id}/confirm",
            post(admin::confirm_appointment),
        )
        .route(
            "/v1/admin/appointments/{id}",
            delete(admin::delete_appointment),
        )
        .route("/v1/admin/categories", post(admin::create_category))
        .route("/v1/admin/categories/{id}", delete(admin::delete_category))
        .route("/v1/admin/services", post(admin::create_service))
        .route(
            "/v1/admin/services/{id}",
            put(admin::update_service).delete(admin::delete_service),
        )
        .route(
            "/v1/admin/services/{id}/image",
            put(admin::replace_service_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the local image directory under its public base URL.
///
/// Returns `None` when images are hosted elsewhere (absolute URL base).
pub fn image_routes(config: &ImagesConfig) -> Option<Router> {
    let base = config.public_base_url.trim_end_matches('/');
    if !base.starts_with('/') || base.len() < 2 {
        return None;
    }
    Some(Router::new().nest_service(base, ServeDir::new(&config.directory)))
}

/// Start the gateway HTTP server and run until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), SalonError> {

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SalonError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SalonError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
