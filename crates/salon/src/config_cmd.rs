// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `salon config` command: print the effective, validated configuration.

use salon_config::SalonConfig;
use salon_core::SalonError;

const REDACTED: &str = "[redacted]";

/// Print the effective configuration as TOML, with secrets masked.
pub fn run_config(config: &SalonConfig) -> Result<(), SalonError> {
    print!("{}", render(config)?);
    Ok(())
}

fn render(config: &SalonConfig) -> Result<String, SalonError> {
    let mut shown = config.clone();
    if shown.email.password.is_some() {
        shown.email.password = Some(REDACTED.to_string());
    }
    if shown.gateway.bearer_token.is_some() {
        shown.gateway.bearer_token = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| SalonError::Config(format!("failed to render configuration: {e}")))
}
