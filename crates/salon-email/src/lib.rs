// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound email for the salon booking service.
//!
//! [`templates`] turns bookings and contact messages into labeled
//! [`Notification`](salon_core::Notification)s; [`SmtpNotifier`] delivers
//! them through an SMTP relay via lettre. [`DisabledNotifier`] stands in
//! when `email.enabled = false`.

pub mod smtp;
pub mod templates;

pub use smtp::{DisabledNotifier, SmtpNotifier};
pub use templates::render_text;
