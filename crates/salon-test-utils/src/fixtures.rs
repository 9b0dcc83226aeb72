// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ready-made records.

use salon_core::Appointment;

/// A pending 4-hour appointment with placeholder customer details.
pub fn appointment(date: &str, start_time: &str) -> Appointment {
    Appointment {
        id: uuid::Uuid::new_v4().to_string(),
        date: date.to_string(),
        start_time: start_time.to_string(),
        duration_hours: 4.0,
        status: "pending".to_string(),
        customer_name: "Test Customer".to_string(),
        customer_email: "customer@example.com".to_string(),
        customer_phone: "04141234567".to_string(),
        service_type: "soft-gel".to_string(),
        created_at: "2026-01-01T00:00:00.000Z".to_string(),
    }
}

/// Same as [`appointment`] with status `confirmed`.
pub fn confirmed(date: &str, start_time: &str) -> Appointment {
    Appointment {
        status: "confirmed".to_string(),
        ..appointment(date, start_time)
    }
}
