// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `salon serve` command implementation.
//!
//! Opens the SQLite store, picks the notifier, wires the booking services
//! into the HTTP gateway and serves until SIGINT or SIGTERM.

use std::sync::Arc;

use salon_config::SalonConfig;
use salon_core::{Notifier, SalonError, SystemClock};
use salon_email::{DisabledNotifier, SmtpNotifier};
use salon_gateway::{AppState, ServerConfig, build_router, image_routes, start_server};
use salon_storage::{LocalImageStore, SqliteStore};
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `salon serve` command.
pub async fn run_serve(config: SalonConfig) -> Result<(), SalonError> {
    init_tracing(&config.salon.log_level);

    info!(salon = config.salon.name.as_str(), "starting salon serve");

    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;
    info!(path = config.storage.database_path.as_str(), "storage ready");

    if let Some((allocated, resident)) = heap_stats() {
        info!(
            allocated_kb = allocated / 1024,
            resident_kb = resident / 1024,
            "memory baseline"
        );
    }

    let notifier = build_notifier(&config)?;
    let images = Arc::new(LocalImageStore::new(&config.images));

    if config.gateway.bearer_token.is_none() {
        warn!("gateway.bearer_token is not set -- admin routes will reject every request");
    }

    let state = AppState::new(
        &config,
        store.clone(),
        store.clone(),
        notifier,
        images,
        Arc::new(SystemClock),
    );

    let mut app = build_router(state);
    if let Some(files) = image_routes(&config.images) {
        app = app.merge(files);
        info!(
            base = config.images.public_base_url.as_str(),
            "serving service images from local directory"
        );
    }

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let cancel = shutdown::install_signal_handler();
    start_server(&server_config, app, cancel.cancelled_owned()).await?;

    store.close().await?;
    info!("salon serve shutdown complete");
    Ok(())
}

/// SMTP when email is enabled, otherwise a notifier that only logs.
fn build_notifier(config: &SalonConfig) -> Result<Arc<dyn Notifier>, SalonError> {
    if config.email.enabled {
        let smtp = SmtpNotifier::new(&config.email)?;
        info!(
            host = config.email.smtp_host.as_deref().unwrap_or_default(),
            port = config.email.smtp_port,
            "email notifications enabled"
        );
        Ok(Arc::new(smtp))
    } else {
        info!("email notifications disabled by configuration");
        Ok(Arc::new(DisabledNotifier))
    }
}

/// Heap `(allocated, resident)` bytes as reported by jemalloc.
#[cfg(not(target_env = "msvc"))]
fn heap_stats() -> Option<(usize, usize)> {
    // Stats are cached until the epoch advances.
    tikv_jemalloc_ctl::epoch::advance().ok()?;
    let allocated = tikv_jemalloc_ctl::stats::allocated::read().ok()?;
    let resident = tikv_jemalloc_ctl::stats::resident::read().ok()?;
    Some((allocated, resident))
}

#[cfg(target_env = "msvc")]
fn heap_stats() -> Option<(usize, usize)> {
    None
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("salon={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
