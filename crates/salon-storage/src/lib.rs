// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the salon booking service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, typed queries for appointments,
//! categories and services, and a filesystem-backed image store.

pub mod adapter;
pub mod database;
pub mod images;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;
pub use images::LocalImageStore;
