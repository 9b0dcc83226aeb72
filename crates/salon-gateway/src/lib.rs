// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the salon booking service.
//!
//! Public routes serve the catalog, the busy calendar, booking requests and
//! the contact form. Admin routes (bearer token, fail-closed) manage
//! appointments and the catalog and expose the statistics dashboard.

pub mod admin;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use error::{ApiError, ErrorResponse};
pub use server::{AppState, ServerConfig, build_router, image_routes, start_server};
