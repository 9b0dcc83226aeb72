// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Appointment store trait (the appointments collaborator).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::SalonError;
use crate::traits::adapter::Adapter;
use crate::types::{Appointment, AppointmentStatus, NewAppointment, Role};

/// Adapter for the store that owns appointment rows.
///
/// Reads are snapshots: callers must not assume they observe writes made
/// by other clients, or even their own, until the next read.
#[async_trait]
pub trait AppointmentStore: Adapter {
    /// Lists appointments whose date lies in `[from, to]` (inclusive).
    ///
    /// With [`Role::Public`] only `pending` and `confirmed` rows are
    /// returned and customer fields are blank.
    async fn list_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        role: Role,
    ) -> Result<Vec<Appointment>, SalonError>;

    /// Lists every appointment, ordered by date ascending.
    async fn list_all(&self) -> Result<Vec<Appointment>, SalonError>;

    /// Inserts a new `pending` appointment and returns the assigned id.
    async fn insert(&self, appointment: &NewAppointment) -> Result<String, SalonError>;

    /// Sets the status of an appointment. Returns `false` if no row matched.
    async fn update_status(&self, id: &str, status: AppointmentStatus)
        -> Result<bool, SalonError>;

    /// Deletes an appointment outright. Returns `false` if no row matched.
    async fn delete(&self, id: &str) -> Result<bool, SalonError>;
}
