// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Appointment queries.

use chrono::NaiveDate;
use rusqlite::params;
use salon_core::types::{DATE_FORMAT, TIME_FORMAT};
use salon_core::{Appointment, AppointmentStatus, NewAppointment, SalonError};

use crate::database::Database;

const FULL_COLUMNS: &str = "id, date, start_time, duration_hours, status, customer_name, \
                            customer_email, customer_phone, service_type, created_at";

fn full_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        date: row.get(1)?,
        start_time: row.get(2)?,
        duration_hours: row.get(3)?,
        status: row.get(4)?,
        customer_name: row.get(5)?,
        customer_email: row.get(6)?,
        customer_phone: row.get(7)?,
        service_type: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Insert a `pending` appointment with a fresh UUID and return the id.
pub async fn insert_appointment(
    db: &Database,
    appointment: &NewAppointment,
) -> Result<String, SalonError> {
    let id = uuid::Uuid::new_v4().to_string();
    let appointment = appointment.clone();
    let row_id = id.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO appointments (id, date, start_time, duration_hours, status,
                     customer_name, customer_email, customer_phone, service_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    row_id,
                    appointment.date.format(DATE_FORMAT).to_string(),
                    appointment.start_time.format(TIME_FORMAT).to_string(),
                    appointment.duration_hours,
                    AppointmentStatus::Pending.to_string(),
                    appointment.customer_name,
                    appointment.customer_email,
                    appointment.customer_phone,
                    appointment.service_type,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(id)
}

/// Full rows with `date` in `[from, to]`, ordered by date then start time.
pub async fn list_range(
    db: &Database,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Appointment>, SalonError> {
    let from = from.format(DATE_FORMAT).to_string();
    let to = to.format(DATE_FORMAT).to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {FULL_COLUMNS} FROM appointments
                 WHERE date >= ?1 AND date <= ?2
                 ORDER BY date ASC, start_time ASC"
            ))?;
            let rows = stmt.query_map(params![from, to], full_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Busy view rows in `[from, to]`: live statuses only, customer fields blank.
pub async fn list_public_range(
    db: &Database,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Appointment>, SalonError> {
    let from = from.format(DATE_FORMAT).to_string();
    let to = to.format(DATE_FORMAT).to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, date, start_time, duration_hours, status FROM appointments_public
                 WHERE date >= ?1 AND date <= ?2
                 ORDER BY date ASC, start_time ASC",
            )?;
            let rows = stmt.query_map(params![from, to], |row| {
                Ok(Appointment {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    start_time: row.get(2)?,
                    duration_hours: row.get(3)?,
                    status: row.get(4)?,
                    customer_name: String::new(),
                    customer_email: String::new(),
                    customer_phone: String::new(),
                    service_type: String::new(),
                    created_at: String::new(),
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Every appointment, ordered by date ascending.
pub async fn list_all(db: &Database) -> Result<Vec<Appointment>, SalonError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {FULL_COLUMNS} FROM appointments ORDER BY date ASC, start_time ASC"
            ))?;
            let rows = stmt.query_map([], full_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set the status of one appointment. Returns whether a row matched.
pub async fn update_status(
    db: &Database,
    id: &str,
    status: AppointmentStatus,
) -> Result<bool, SalonError> {
    let id = id.to_string();
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE appointments SET status = ?1 WHERE id = ?2",
                params![status, id],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete one appointment. Returns whether a row matched.
pub async fn delete_appointment(db: &Database, id: &str) -> Result<bool, SalonError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
