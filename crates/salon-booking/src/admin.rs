// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar views and appointment management for the salon owner.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use salon_core::{Appointment, AppointmentStatus, AppointmentStore, BusySlot, Clock, Role, SalonError};

use crate::calendar::month_range;
use crate::conflict::TimeSlot;
use crate::stats::{StatsAggregator, StatsReport};

/// A month of the calendar as seen by one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum MonthView {
    /// Visitors only learn when the salon is busy.
    Busy { slots: Vec<BusySlot> },
    /// The owner sees every row.
    Full { appointments: Vec<Appointment> },
}

pub struct AdminService {
    appointments: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
    aggregator: StatsAggregator,
}

impl AdminService {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        clock: Arc<dyn Clock>,
        aggregator: StatsAggregator,
    ) -> Self {
        Self {
            appointments,
            clock,
            aggregator,
        }
    }

    /// Appointments of the month containing `month`.
    pub async fn list_month(&self, month: NaiveDate, role: Role) -> Result<MonthView, SalonError> {
        let (from, to) = month_range(month);
        let rows = self.appointments.list_range(from, to, role).await?;
        Ok(match role {
            Role::Public => MonthView::Busy {
                slots: rows
                    .iter()
                    .filter_map(|row| TimeSlot::from_appointment(row).map(|slot| slot.busy(&row.id)))
                    .collect(),
            },
            Role::Admin => MonthView::Full { appointments: rows },
        })
    }

    pub async fn confirm(&self, id: &str) -> Result<(), SalonError> {
        if !self
            .appointments
            .update_status(id, AppointmentStatus::Confirmed)
            .await?
        {
            return Err(not_found(id));
        }
        info!(id, "appointment confirmed");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), SalonError> {
        if !self.appointments.delete(id).await? {
            return Err(not_found(id));
        }
        info!(id, "appointment deleted");
        Ok(())
    }

    /// Statistics over every stored appointment at the current instant.
    pub async fn dashboard(&self) -> Result<StatsReport, SalonError> {
        let rows = self.appointments.list_all().await?;
        let report = self.aggregator.aggregate(&rows, self.clock.now());
        if report.skipped > 0 || report.excluded > 0 {
            warn!(
                skipped = report.skipped,
                excluded = report.excluded,
                "dashboard ignored unusable appointment rows"
            );
        }
        Ok(report)
    }
}

fn not_found(id: &str) -> SalonError {
    SalonError::NotFound {
        entity: "appointment",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use salon_test_utils::fixtures::appointment;
    use salon_test_utils::{FixedClock, MemoryStore};

    fn service(store: Arc<MemoryStore>) -> AdminService {
        let now = NaiveDateTime::parse_from_str("2026-03-11 12:00", "%Y-%m-%d %H:%M").unwrap();
        AdminService::new(store, Arc::new(FixedClock::new(now)), StatsAggregator::default())
    }

    fn first_of(month: &str) -> NaiveDate {
        NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn public_view_is_busy_slots_only() {
        let store = Arc::new(MemoryStore::new());
        store.push_appointment(appointment("2026-03-12", "10:00:00"));
        store.push_appointment(appointment("2026-04-02", "10:00:00"));
        let admin = service(store);

        match admin.list_month(first_of("2026-03"), Role::Public).await.unwrap() {
            MonthView::Busy { slots } => {
                assert_eq!(slots.len(), 1);
                assert_eq!(slots[0].end.format("%H:%M").to_string(), "14:00");
            }
            other => panic!("expected busy view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn admin_view_has_full_rows() {
        let store = Arc::new(MemoryStore::new());
        store.push_appointment(appointment("2026-03-12", "10:00:00"));
        let admin = service(store);

        match admin.list_month(first_of("2026-03"), Role::Admin).await.unwrap() {
            MonthView::Full { appointments } => {
                assert_eq!(appointments[0].customer_email, "customer@example.com");
            }
            other => panic!("expected full view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn confirm_and_delete_report_missing_ids() {
        let store = Arc::new(MemoryStore::new());
        let row = appointment("2026-03-12", "10:00:00");
        let id = row.id.clone();
        store.push_appointment(row);
        let admin = service(store.clone());

        admin.confirm(&id).await.unwrap();
        assert_eq!(store.appointments()[0].status, "confirmed");
        assert!(matches!(
            admin.confirm("missing").await,
            Err(SalonError::NotFound { entity: "appointment", .. })
        ));

        admin.delete(&id).await.unwrap();
        assert!(store.appointments().is_empty());
        assert!(matches!(admin.delete(&id).await, Err(SalonError::NotFound { .. })));
    }

    #[tokio::test]
    async fn dashboard_aggregates_at_clock_now() {
        let store = Arc::new(MemoryStore::new());
        let mut today = appointment("2026-03-11", "10:00:00");
        today.status = "confirmed".into();
        let mut yesterday = appointment("2026-03-10", "10:00:00");
        yesterday.status = "confirmed".into();
        store.push_appointment(today);
        store.push_appointment(yesterday);
        store.push_appointment(appointment("2026-05-01", "10:00:00"));
        let admin = service(store);

        let report = admin.dashboard().await.unwrap();
        assert_eq!(report.future.pending, 1);
        assert_eq!(report.future.today, 1);
        assert_eq!(report.past.yesterday, 1);
    }
}
