// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the salon booking service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SalonConfig {
    /// Business identity and logging.
    #[serde(default)]
    pub salon: SalonSection,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Calendar and booking rules.
    #[serde(default)]
    pub booking: BookingConfig,

    /// Outbound email settings.
    #[serde(default)]
    pub email: EmailConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Service image hosting settings.
    #[serde(default)]
    pub images: ImagesConfig,
}

/// Business identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SalonSection {
    /// Display name of the salon, used in email subjects and logs.
    #[serde(default = "default_salon_name")]
    pub name: String,

    /// Address that receives "new appointment" and contact-form emails.
    #[serde(default)]
    pub owner_email: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SalonSection {
    fn default() -> Self {
        Self {
            name: default_salon_name(),
            owner_email: None,
            log_level: default_log_level(),
        }
    }
}

fn default_salon_name() -> String {
    "salon".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("salon").join("salon.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("salon.db"))
        .to_string_lossy()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Calendar and booking rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Length of every booked appointment, in hours.
    #[serde(default = "default_duration_hours")]
    pub duration_hours: f64,

    /// Minimum number of days between today and a bookable date.
    #[serde(default = "default_lead_days")]
    pub lead_days: u32,

    /// Weekdays the salon is closed (`sun`, `monday`, ...).
    #[serde(default = "default_closed_weekdays")]
    pub closed_weekdays: Vec<String>,

    /// First hour at which an appointment may start.
    #[serde(default = "default_opening_hour")]
    pub opening_hour: u32,

    /// Hour after which no appointment may start.
    #[serde(default = "default_closing_hour")]
    pub closing_hour: u32,

    /// First day of the week for "this week" statistics.
    #[serde(default = "default_week_starts_on")]
    pub week_starts_on: String,

    /// Service types a customer may pick in the booking form.
    #[serde(default = "default_service_types")]
    pub service_types: Vec<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            duration_hours: default_duration_hours(),
            lead_days: default_lead_days(),
            closed_weekdays: default_closed_weekdays(),
            opening_hour: default_opening_hour(),
            closing_hour: default_closing_hour(),
            week_starts_on: default_week_starts_on(),
            service_types: default_service_types(),
        }
    }
}

impl BookingConfig {
    /// Parsed closed weekdays. Unparsable names are dropped (validation reports them).
    pub fn closed_weekdays(&self) -> Vec<Weekday> {
        self.closed_weekdays
            .iter()
            .filter_map(|d| d.trim().parse::<Weekday>().ok())
            .collect()
    }

    /// Parsed week start, falling back to Sunday.
    pub fn week_start(&self) -> Weekday {
        self.week_starts_on
            .trim()
            .parse::<Weekday>()
            .unwrap_or(Weekday::Sun)
    }
}

fn default_duration_hours() -> f64 {
    4.0
}

fn default_lead_days() -> u32 {
    3
}

fn default_closed_weekdays() -> Vec<String> {
    vec!["sun".to_string()]
}

fn default_opening_hour() -> u32 {
    8
}

fn default_closing_hour() -> u32 {
    23
}

fn default_week_starts_on() -> String {
    "sun".to_string()
}

fn default_service_types() -> Vec<String> {
    ["soft-gel", "acrylic-system", "rubber-base-leveling", "kapping"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Outbound email (SMTP) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// Send notifications at all. When `false` bookings are stored silently.
    #[serde(default)]
    pub enabled: bool,

    /// SMTP relay host.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username.
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password. Prefer `SALON_EMAIL_PASSWORD` over the file.
    #[serde(default)]
    pub password: Option<String>,

    /// `From:` address of outgoing mail.
    #[serde(default)]
    pub from_address: Option<String>,

    /// Use STARTTLS on a plain connection instead of implicit TLS.
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_address: None,
            starttls: default_starttls(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token guarding the admin routes. `None` locks them.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Service image hosting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Directory holding uploaded images.
    #[serde(default = "default_images_directory")]
    pub directory: String,

    /// URL prefix under which `directory` is served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            directory: default_images_directory(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_images_directory() -> String {
    dirs::data_dir()
        .map(|p| p.join("salon").join("images"))
        .unwrap_or_else(|| std::path::PathBuf::from("images"))
        .to_string_lossy()
        .to_string()
}

fn default_public_base_url() -> String {
    "/images".to_string()
}
