// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier that records instead of sending.

use std::sync::Mutex;

use async_trait::async_trait;

use salon_core::{Adapter, AdapterType, HealthStatus, Notification, Notifier, SalonError};

/// Captures every notification passed to `send()`.
///
/// A failing notifier records nothing and returns `SalonError::Notification`.
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A notifier whose every send fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Notifications delivered so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        crate::lock(&self.sent).clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for RecordingNotifier {
    fn name(&self) -> &str {
        "recording-notifier"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, SalonError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), SalonError> {
        if self.fail {
            return Err(SalonError::Notification {
                message: format!("simulated failure sending to {}", notification.to),
                source: None,
            });
        }
        crate::lock(&self.sent).push(notification.clone());
        Ok(())
    }
}
