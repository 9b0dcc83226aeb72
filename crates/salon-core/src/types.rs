// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across store traits and the booking services.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Storage format of `Appointment::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format of `Appointment::start_time`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Lifecycle state of an appointment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Requested by a customer, awaiting the owner.
    Pending,
    /// Accepted by an admin.
    Confirmed,
}

/// Who is reading the calendar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Customers only see when the salon is busy.
    Public,
    /// The owner sees full rows in every status.
    Admin,
}

/// Display language for catalog names and email labels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// An appointment row exactly as read from the store.
///
/// `date`, `start_time` and `status` stay as raw text so that rows written
/// by other clients can be inspected without failing the whole read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: String,
    pub start_time: String,
    pub duration_hours: f64,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_type: String,
    pub created_at: String,
}

impl Appointment {
    /// Parses the stored status, `None` for anything outside the known set.
    pub fn parsed_status(&self) -> Option<AppointmentStatus> {
        self.status.parse().ok()
    }

    /// Parses the stored calendar date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Start instant, combining `date` and `start_time`.
    ///
    /// Accepts `HH:MM:SS` and the shorter `HH:MM`.
    pub fn start(&self) -> Option<NaiveDateTime> {
        let date = self.parsed_date()?;
        let raw = self.start_time.trim();
        let time = NaiveTime::parse_from_str(raw, TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .ok()?;
        Some(date.and_time(time))
    }

    /// End instant: `start + duration_hours`. Never persisted.
    ///
    /// `None` when the sum falls outside the representable calendar.
    pub fn end(&self) -> Option<NaiveDateTime> {
        let start = self.start()?;
        start.checked_add_signed(hours(self.duration_hours)?)
    }
}

/// Converts a decimal hour count to a duration, rejecting non-finite or negative input.
pub fn hours(value: f64) -> Option<Duration> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Duration::try_milliseconds((value * 3_600_000.0).round() as i64)
}

/// A booking ready to be inserted. New rows always start as `pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_type: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: f64,
}

/// Public projection of an appointment: the calendar only shows it as busy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusySlot {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A service category (e.g. "Manicure").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name_es: String,
    pub name_en: String,
    pub active: bool,
}

impl Category {
    pub fn name(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.name_es,
            Locale::En => &self.name_en,
        }
    }
}

/// Fields needed to create a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name_es: String,
    pub name_en: String,
}

/// A bookable service with bilingual copy and a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub category_id: i64,
    pub title_es: String,
    pub title_en: String,
    pub description_es: String,
    pub description_en: String,
    pub price: f64,
    pub image_url: Option<String>,
}

impl Service {
    pub fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.title_es,
            Locale::En => &self.title_en,
        }
    }

    pub fn description(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.description_es,
            Locale::En => &self.description_en,
        }
    }
}

/// Editable fields of a service. The image is handled separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub category_id: Option<i64>,
    pub title_es: String,
    pub title_en: String,
    pub description_es: String,
    pub description_en: String,
    pub price: f64,
}

/// A category together with its services, sorted by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithServices {
    pub category: Category,
    pub services: Vec<Service>,
}

/// One `label: value` line of an email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

impl LabeledField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A fully rendered email ready for a [`Notifier`](crate::Notifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub fields: Vec<LabeledField>,
    pub footer: String,
    pub closing: String,
}

/// A single failed form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    AppointmentStore,
    CatalogStore,
    Notifier,
    ImageStore,
}
