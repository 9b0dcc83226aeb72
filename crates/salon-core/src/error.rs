// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the salon booking service.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::types::FieldError;

/// The primary error type used across all store traits and booking operations.
#[derive(Debug, Error)]
pub enum SalonError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Email delivery errors (SMTP failure, malformed address).
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image storage errors (upload, download, removal).
    #[error("image store error: {message}")]
    ImageStore {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// One or more form fields failed validation.
    #[error("validation failed: {}", summarize_fields(.0))]
    Validation(Vec<FieldError>),

    /// An interval whose end precedes its start.
    #[error("invalid interval: end {end} is before start {start}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// The requested slot overlaps an appointment already on the calendar.
    #[error("slot {start} - {end} overlaps an existing appointment")]
    SlotConflict {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// The requested slot falls outside the bookable calendar.
    #[error("slot unavailable: {0}")]
    SlotUnavailable(String),

    /// A record addressed by id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

fn summarize_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SalonError {
    /// Shorthand for wrapping any storage-layer error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SalonError::Storage {
            source: Box::new(err),
        }
    }
}
