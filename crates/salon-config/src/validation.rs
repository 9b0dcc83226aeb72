// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: non-empty paths,
//! hour ranges, weekday names, and email settings that only matter when
//! email is enabled.

use std::collections::HashSet;

use chrono::Weekday;

use crate::diagnostic::ConfigError;
use crate::model::SalonConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors (does not fail fast).
pub fn validate_config(config: &SalonConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let booking = &config.booking;
    if !(booking.duration_hours.is_finite() && booking.duration_hours > 0.0) {
        fail(format!(
            "booking.duration_hours must be positive, got {}",
            booking.duration_hours
        ));
    }

    if booking.opening_hour >= 24 || booking.closing_hour > 24 {
        fail(format!(
            "booking hours must lie within 0-24, got {}-{}",
            booking.opening_hour, booking.closing_hour
        ));
    } else if booking.opening_hour >= booking.closing_hour {
        fail(format!(
            "booking.opening_hour ({}) must be before booking.closing_hour ({})",
            booking.opening_hour, booking.closing_hour
        ));
    }

    for day in &booking.closed_weekdays {
        if day.trim().parse::<Weekday>().is_err() {
            fail(format!("booking.closed_weekdays: `{day}` is not a weekday"));
        }
    }

    let closed: HashSet<Weekday> = booking.closed_weekdays().into_iter().collect();
    if closed.len() == 7 {
        fail("booking.closed_weekdays closes every day of the week".to_string());
    }

    if booking.week_starts_on.trim().parse::<Weekday>().is_err() {
        fail(format!(
            "booking.week_starts_on: `{}` is not a weekday",
            booking.week_starts_on
        ));
    }

    if booking.service_types.iter().all(|s| s.trim().is_empty()) {
        fail("booking.service_types must list at least one service".to_string());
    }

    if config.email.enabled {
        if config.email.smtp_host.as_deref().is_none_or(|h| h.trim().is_empty()) {
            fail("email.smtp_host is required when email.enabled = true".to_string());
        }
        if config.email.from_address.as_deref().is_none_or(|a| !a.contains('@')) {
            fail("email.from_address must be an email address when email.enabled = true".to_string());
        }
        if config.salon.owner_email.as_deref().is_none_or(|a| !a.contains('@')) {
            fail("salon.owner_email must be an email address when email.enabled = true".to_string());
        }
    }

    if config.gateway.host.trim().is_empty() {
        fail("gateway.host must not be empty".to_string());
    }

    if let Some(token) = &config.gateway.bearer_token
        && token.len() < 16
    {
        fail("gateway.bearer_token must be at least 16 characters".to_string());
    }

    if config.images.directory.trim().is_empty() {
        fail("images.directory must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SalonConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = SalonConfig::default();
        config.storage.database_path = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "database_path"));
    }

    #[test]
    fn zero_duration_fails_validation() {
        let mut config = SalonConfig::default();
        config.booking.duration_hours = 0.0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "duration_hours"));
    }

    #[test]
    fn inverted_hours_fail_validation() {
        let mut config = SalonConfig::default();
        config.booking.opening_hour = 20;
        config.booking.closing_hour = 9;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "opening_hour"));
    }

    #[test]
    fn unknown_weekday_fails_validation() {
        let mut config = SalonConfig::default();
        config.booking.closed_weekdays = vec!["sun".into(), "funday".into()];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "funday"));
    }

    #[test]
    fn enabled_email_requires_host_and_addresses() {
        let mut config = SalonConfig::default();
        config.email.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "smtp_host"));
        assert!(has_error(&errors, "from_address"));
        assert!(has_error(&errors, "owner_email"));
    }

    #[test]
    fn complete_email_settings_pass() {
        let mut config = SalonConfig::default();
        config.email.enabled = true;
        config.email.smtp_host = Some("smtp.example.com".into());
        config.email.from_address = Some("citas@example.com".into());
        config.salon.owner_email = Some("owner@example.com".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn short_bearer_token_fails_validation() {
        let mut config = SalonConfig::default();
        config.gateway.bearer_token = Some("abc".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "bearer_token"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = SalonConfig::default();
        config.storage.database_path.clear();
        config.images.directory.clear();
        config.booking.week_starts_on = "someday".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
