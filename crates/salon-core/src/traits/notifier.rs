// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier trait for outbound email.

use async_trait::async_trait;

use crate::error::SalonError;
use crate::traits::adapter::Adapter;
use crate::types::Notification;

/// Adapter for the notification collaborator.
///
/// A failed send is reported to the caller; it never undoes the write that
/// triggered it.
#[async_trait]
pub trait Notifier: Adapter {
    /// Delivers a rendered notification.
    async fn send(&self, notification: &Notification) -> Result<(), SalonError>;
}
