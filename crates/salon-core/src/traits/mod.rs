// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Everything the booking logic needs from the outside world (appointment
//! rows, the service catalog, email delivery, image hosting, the current
//! time) is reached through one of these traits. Adapters extend the
//! [`Adapter`] base trait and use `#[async_trait]` for dynamic dispatch.

pub mod adapter;
pub mod appointments;
pub mod catalog;
pub mod clock;
pub mod images;
pub mod notifier;

pub use adapter::Adapter;
pub use appointments::AppointmentStore;
pub use catalog::CatalogStore;
pub use clock::{Clock, SystemClock};
pub use images::ImageStore;
pub use notifier::Notifier;
