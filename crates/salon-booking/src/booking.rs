// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The customer booking flow.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use salon_config::SalonConfig;
use salon_core::{
    AppointmentStore, Clock, NewAppointment, Notification, Notifier, Role, SalonError,
};
use salon_email::templates;

use crate::calendar::{month_range, round_to_hour, CalendarRules};
use crate::conflict::{has_conflict, occupied_slots, TimeSlot};
use crate::forms::{validate_booking, BookingRequest};

/// Result of a successful booking.
///
/// The appointment is stored even when a notification failed; the failures
/// are listed here instead of failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub id: String,
    pub slot: TimeSlot,
    pub customer_notified: bool,
    pub owner_notified: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_errors: Vec<String>,
}

/// Validates, checks and stores booking requests, then emails both parties.
pub struct BookingService {
    appointments: Arc<dyn AppointmentStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    rules: CalendarRules,
    service_types: Vec<String>,
    owner_email: Option<String>,
}

impl BookingService {
    pub fn new(
        config: &SalonConfig,
        appointments: Arc<dyn AppointmentStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointments,
            notifier,
            clock,
            rules: CalendarRules::from_config(&config.booking),
            service_types: config.booking.service_types.clone(),
            owner_email: config.salon.owner_email.clone(),
        }
    }

    pub fn rules(&self) -> &CalendarRules {
        &self.rules
    }

    /// Books the slot starting at the hour of `request.start`.
    ///
    /// Fails with `Validation`, `SlotUnavailable` or `SlotConflict` before
    /// anything is written. The conflict check runs against the public view
    /// from the first of the slot's month through the day the slot ends, as
    /// fetched here; a booking stored by someone else after that fetch is not
    /// detected.
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingOutcome, SalonError> {
        validate_booking(request, &self.service_types)?;

        let now = self.clock.now();
        let start = round_to_hour(request.start);
        self.rules.check_bookable(start, now)?;
        let candidate = self.rules.slot_for(start)?;

        let (from, month_end) = month_range(start.date());
        let to = month_end.max(candidate.end().date());
        let snapshot = self.appointments.list_range(from, to, Role::Public).await?;
        if has_conflict(&candidate, &occupied_slots(&snapshot)) {
            debug!(start = %candidate.start(), "requested slot overlaps the calendar");
            return Err(SalonError::SlotConflict {
                start: candidate.start(),
                end: candidate.end(),
            });
        }

        let appointment = NewAppointment {
            customer_name: request.name.trim().to_string(),
            customer_email: request.email.trim().to_string(),
            customer_phone: request.phone.trim().to_string(),
            service_type: request.service.trim().to_string(),
            date: start.date(),
            start_time: start.time(),
            duration_hours: self.rules.duration_hours,
        };
        let id = self.appointments.insert(&appointment).await?;
        info!(id = %id, date = %appointment.date, start = %appointment.start_time, "appointment requested");

        let mut outcome = BookingOutcome {
            id,
            slot: candidate,
            customer_notified: false,
            owner_notified: false,
            notification_errors: Vec::new(),
        };

        let customer = templates::customer_booking(&appointment, request.locale);
        outcome.customer_notified = self.deliver(&customer, &mut outcome.notification_errors).await;

        match &self.owner_email {
            Some(owner) => {
                let alert = templates::owner_booking(&appointment, owner);
                outcome.owner_notified = self.deliver(&alert, &mut outcome.notification_errors).await;
            }
            None => outcome
                .notification_errors
                .push("no owner email configured".to_string()),
        }

        Ok(outcome)
    }

    async fn deliver(&self, notification: &Notification, errors: &mut Vec<String>) -> bool {
        match self.notifier.send(notification).await {
            Ok(()) => true,
            Err(e) => {
                warn!(to = %notification.to, error = %e, "booking notification failed");
                errors.push(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use salon_core::{AppointmentStatus, Locale};
    use salon_test_utils::{FixedClock, MemoryStore, RecordingNotifier};

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn config() -> SalonConfig {
        let mut config = SalonConfig::default();
        config.salon.owner_email = Some("owner@example.com".into());
        config
    }

    fn request(start: &str) -> BookingRequest {
        BookingRequest {
            name: "Ana Pérez".into(),
            email: "ana@example.com".into(),
            phone: "04121234567".into(),
            service: "soft-gel".into(),
            start: dt(start),
            locale: Locale::En,
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
        service: BookingService,
    }

    fn fixture_with(config: SalonConfig, notifier: RecordingNotifier) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(notifier);
        // Monday 2026-03-09.
        let clock = Arc::new(FixedClock::new(dt("2026-03-09 09:00")));
        let service = BookingService::new(&config, store.clone(), notifier.clone(), clock);
        Fixture {
            store,
            notifier,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(config(), RecordingNotifier::new())
    }

    #[tokio::test]
    async fn happy_path_stores_pending_and_emails_both() {
        let f = fixture();
        let outcome = f.service.book(&request("2026-03-12 10:25")).await.unwrap();

        assert_eq!(outcome.slot.start(), dt("2026-03-12 10:00"));
        assert_eq!(outcome.slot.end(), dt("2026-03-12 14:00"));
        assert!(outcome.customer_notified && outcome.owner_notified);

        let rows = f.store.appointments();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, outcome.id);
        assert_eq!(rows[0].parsed_status(), Some(AppointmentStatus::Pending));
        assert_eq!(rows[0].start_time, "10:00:00");

        let sent = f.notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "ana@example.com");
        assert_eq!(sent[0].fields[0].label, "Name");
        assert_eq!(sent[1].to, "owner@example.com");
        assert_eq!(sent[1].subject, "Nueva cita solicitada");
    }

    #[tokio::test]
    async fn overlapping_request_is_rejected_without_writing() {
        let f = fixture();
        f.service.book(&request("2026-03-12 10:00")).await.unwrap();

        let err = f.service.book(&request("2026-03-12 12:00")).await.unwrap_err();
        assert!(matches!(err, SalonError::SlotConflict { .. }));
        assert_eq!(f.store.appointments().len(), 1);
        assert_eq!(f.notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn back_to_back_bookings_are_allowed() {
        let f = fixture();
        f.service.book(&request("2026-03-12 10:00")).await.unwrap();
        f.service.book(&request("2026-03-12 14:00")).await.unwrap();
        assert_eq!(f.store.appointments().len(), 2);
    }

    #[tokio::test]
    async fn calendar_rules_are_enforced() {
        let f = fixture();
        let too_soon = f.service.book(&request("2026-03-11 10:00")).await.unwrap_err();
        assert!(matches!(too_soon, SalonError::SlotUnavailable(_)));
        let sunday = f.service.book(&request("2026-03-15 10:00")).await.unwrap_err();
        assert!(matches!(sunday, SalonError::SlotUnavailable(_)));
        let late = f.service.book(&request("2026-03-12 23:30")).await.unwrap_err();
        assert!(matches!(late, SalonError::SlotUnavailable(_)));
        assert!(f.store.appointments().is_empty());
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_first() {
        let f = fixture();
        let mut bad = request("2026-03-11 10:00");
        bad.phone = "555".into();
        let err = f.service.book(&bad).await.unwrap_err();
        assert!(matches!(err, SalonError::Validation(_)));
    }

    #[tokio::test]
    async fn notification_failure_keeps_the_appointment() {
        let f = fixture_with(config(), RecordingNotifier::failing());
        let outcome = f.service.book(&request("2026-03-12 10:00")).await.unwrap();

        assert!(!outcome.customer_notified);
        assert!(!outcome.owner_notified);
        assert_eq!(outcome.notification_errors.len(), 2);
        assert_eq!(f.store.appointments().len(), 1);
    }

    #[tokio::test]
    async fn missing_owner_email_is_reported() {
        let f = fixture_with(SalonConfig::default(), RecordingNotifier::new());
        let outcome = f.service.book(&request("2026-03-12 10:00")).await.unwrap();
        assert!(outcome.customer_notified);
        assert!(!outcome.owner_notified);
        assert_eq!(f.notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn slot_running_into_next_month_sees_its_rows() {
        let mut config = config();
        config.booking.duration_hours = 30.0;
        let f = fixture_with(config, RecordingNotifier::new());
        f.store
            .push_appointment(salon_test_utils::fixtures::appointment("2026-04-01", "08:00:00"));

        // Tuesday 2026-03-31 10:00 plus 30h runs to 2026-04-01 16:00.
        let err = f.service.book(&request("2026-03-31 10:00")).await.unwrap_err();
        assert!(matches!(err, SalonError::SlotConflict { .. }));
        assert_eq!(f.store.appointments().len(), 1);
    }

    #[tokio::test]
    async fn unknown_status_rows_do_not_block_the_calendar() {
        let f = fixture();
        let mut cancelled = salon_test_utils::fixtures::appointment("2026-03-12", "10:00:00");
        cancelled.status = "cancelled".into();
        f.store.push_appointment(cancelled);

        f.service.book(&request("2026-03-12 10:00")).await.unwrap();
        assert_eq!(f.store.appointments().len(), 2);
    }
}
