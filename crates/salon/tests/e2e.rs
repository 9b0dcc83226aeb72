// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the booking pipeline over a real SQLite store.
//!
//! Each test creates an isolated TestHarness with a temp database and mock
//! notifier, image store and clock. Tests are independent and order-insensitive.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};

use salon_booking::{
    AdminService, BookingRequest, BookingService, CatalogService, ImageUpload, MonthView,
    StatsAggregator,
};
use salon_core::{AppointmentStore, Clock, Locale, NewCategory, Role, SalonError, ServiceDraft};
use salon_test_utils::TestHarness;

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn request(start: &str) -> BookingRequest {
    BookingRequest {
        name: "María González".into(),
        email: "maria@example.com".into(),
        phone: "04241234567".into(),
        service: "acrylic-system".into(),
        start: dt(start),
        locale: Locale::Es,
    }
}

fn services(h: &TestHarness) -> (BookingService, AdminService) {
    let booking = BookingService::new(
        &h.config,
        h.store.clone(),
        h.notifier.clone(),
        h.clock.clone(),
    );
    let admin = AdminService::new(
        h.store.clone(),
        h.clock.clone(),
        StatsAggregator::new(h.config.booking.week_start()),
    );
    (booking, admin)
}

// ---- Booking lifecycle ----

#[tokio::test]
async fn booking_confirm_and_dashboard_over_sqlite() {
    let h = TestHarness::builder().build().await.unwrap();
    let (booking, admin) = services(&h);

    let outcome = booking.book(&request("2026-03-12 15:45")).await.unwrap();
    assert_eq!(outcome.slot.start(), dt("2026-03-12 15:00"));
    assert_eq!(outcome.slot.end(), dt("2026-03-12 19:00"));
    assert!(outcome.customer_notified && outcome.owner_notified);

    let sent = h.notifier.sent();
    assert_eq!(sent[0].to, "maria@example.com");
    assert_eq!(sent[1].to, "owner@example.com");
    assert_eq!(sent[1].subject, "Nueva cita solicitada");

    admin.confirm(&outcome.id).await.unwrap();

    // Three days later the appointment is today's.
    h.clock.advance(Duration::days(3));
    let report = admin.dashboard().await.unwrap();
    assert_eq!(report.future.confirmed, 1);
    assert_eq!(report.future.today, 1);
    assert_eq!(report.future.pending, 0);

    // After the visit it becomes yesterday's.
    h.clock.advance(Duration::days(1));
    let report = admin.dashboard().await.unwrap();
    assert_eq!(report.future.confirmed, 0);
    assert_eq!(report.past.yesterday, 1);
    assert_eq!(report.past.all_past, 1);
}

#[tokio::test]
async fn second_booking_in_same_slot_conflicts() {
    let h = TestHarness::builder().build().await.unwrap();
    let (booking, _) = services(&h);

    booking.book(&request("2026-03-13 09:00")).await.unwrap();
    let err = booking.book(&request("2026-03-13 12:00")).await.unwrap_err();
    assert!(matches!(err, SalonError::SlotConflict { .. }));

    // Back-to-back is fine: intervals are half-open.
    booking.book(&request("2026-03-13 13:00")).await.unwrap();
    assert_eq!(h.store.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleted_appointment_frees_the_slot() {
    let h = TestHarness::builder().build().await.unwrap();
    let (booking, admin) = services(&h);

    let first = booking.book(&request("2026-03-13 09:00")).await.unwrap();
    admin.delete(&first.id).await.unwrap();
    booking.book(&request("2026-03-13 10:00")).await.unwrap();

    let month = admin.list_month(dt("2026-03-01 00:00").date(), Role::Public).await.unwrap();
    match month {
        MonthView::Busy { slots } => {
            assert_eq!(slots.len(), 1);
            assert_eq!(slots[0].start, dt("2026-03-13 10:00"));
        }
        other => panic!("expected busy view, got {other:?}"),
    }
}

#[tokio::test]
async fn failing_email_keeps_the_appointment() {
    let h = TestHarness::builder()
        .with_failing_notifier()
        .build()
        .await
        .unwrap();
    let (booking, _) = services(&h);

    let outcome = booking.book(&request("2026-03-12 10:00")).await.unwrap();
    assert!(!outcome.customer_notified);
    assert!(!outcome.owner_notified);
    assert_eq!(outcome.notification_errors.len(), 2);
    assert_eq!(h.store.list_all().await.unwrap().len(), 1);
}

// ---- Catalog ----

#[tokio::test]
async fn moving_a_service_moves_its_picture() {
    let h = TestHarness::builder().build().await.unwrap();
    let catalog = CatalogService::new(h.store.clone(), h.images.clone(), h.clock.clone());

    let hands = catalog
        .create_category(&NewCategory {
            name_es: "Manos".into(),
            name_en: "Hands".into(),
        })
        .await
        .unwrap();
    let feet = catalog
        .create_category(&NewCategory {
            name_es: "Pies".into(),
            name_en: "Feet".into(),
        })
        .await
        .unwrap();

    let mut draft = ServiceDraft {
        category_id: Some(hands),
        title_es: "Manicure".into(),
        title_en: "Manicure".into(),
        description_es: "Clásico".into(),
        description_en: "Classic".into(),
        price: 15.0,
    };
    let upload = ImageUpload {
        bytes: vec![1, 2, 3],
        ext: "webp".into(),
    };
    let id = catalog.create_service(&draft, Some(upload)).await.unwrap();
    let millis = h.clock.now().and_utc().timestamp_millis();
    assert_eq!(h.images.paths(), vec![format!("services_hands/{millis}.webp")]);

    h.clock.advance(Duration::seconds(5));
    draft.category_id = Some(feet);
    catalog.update_service(id, &draft, None).await.unwrap();

    let paths = h.images.paths();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].starts_with("services_feet/"));
    assert_eq!(h.images.bytes(&paths[0]), Some(vec![1, 2, 3]));

    let es = catalog.catalog(Locale::Es).await.unwrap();
    assert!(es.iter().find(|c| c.id == hands).unwrap().services.is_empty());
    assert_eq!(es.iter().find(|c| c.id == feet).unwrap().services[0].id, id);
}

// ---- Public privacy ----

#[tokio::test]
async fn public_range_never_exposes_customers() {
    let h = TestHarness::builder().build().await.unwrap();
    let (booking, _) = services(&h);
    booking.book(&request("2026-03-12 10:00")).await.unwrap();

    let day = dt("2026-03-12 00:00").date();
    let rows = h.store.list_range(day, day, Role::Public).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].customer_name.is_empty());
    assert!(rows[0].customer_email.is_empty());
    assert!(rows[0].customer_phone.is_empty());

    let rows = h.store.list_range(day, day, Role::Admin).await.unwrap();
    assert_eq!(rows[0].customer_email, "maria@example.com");
}

#[tokio::test]
async fn harness_clock_is_shared_with_services() {
    let h = TestHarness::builder()
        .with_now(dt("2026-03-10 09:00"))
        .build()
        .await
        .unwrap();
    let clock: Arc<dyn Clock> = h.clock.clone();
    assert_eq!(clock.now(), dt("2026-03-10 09:00"));
}
