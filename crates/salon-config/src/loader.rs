// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./salon.toml` > `~/.config/salon/salon.toml` > `/etc/salon/salon.toml`
//! with environment variable overrides via `SALON_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SalonConfig;

/// Sections that env var names are split on, in the order they are tried.
const SECTIONS: &[&str] = &["salon", "storage", "booking", "email", "gateway", "images"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/salon/salon.toml` (system-wide)
/// 3. `~/.config/salon/salon.toml` (user XDG config)
/// 4. `./salon.toml` (local directory)
/// 5. `SALON_*` environment variables
pub fn load_config() -> Result<SalonConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SalonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SalonConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SalonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SalonConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SalonConfig::default()))
        .merge(Toml::file("/etc/salon/salon.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("salon/salon.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("salon.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `SALON_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after the section name becomes a dot, so
/// `SALON_EMAIL_SMTP_HOST` maps to `email.smtp_host`, not `email.smtp.host`.
fn env_provider() -> Env {
    Env::prefixed("SALON_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(*section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.clone());
        mapped.into()
    })
}
