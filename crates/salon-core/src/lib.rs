// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the salon booking service.
//!
//! This crate provides the error type, the domain types, and the
//! collaborator traits used throughout the workspace. Store, mailer and
//! image adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SalonError;
pub use types::{
    AdapterType, Appointment, AppointmentStatus, BusySlot, Category, CategoryWithServices,
    FieldError, HealthStatus, LabeledField, Locale, NewAppointment, NewCategory, Notification,
    Role, Service, ServiceDraft,
};

// Re-export all collaborator traits at crate root.
pub use traits::{
    Adapter, AppointmentStore, CatalogStore, Clock, ImageStore, Notifier, SystemClock,
};
