// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email templates.
//!
//! A notification is a subject, an ordered list of `label: value` lines, a
//! footer and a closing. Customers get labels in their own locale; the salon
//! owner always reads Spanish.

use salon_core::types::{DATE_FORMAT, TIME_FORMAT};
use salon_core::{LabeledField, Locale, NewAppointment, Notification};

/// Subject of the owner's "new booking" email.
pub const OWNER_BOOKING_SUBJECT: &str = "Nueva cita solicitada";

struct Labels {
    subject: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    service: &'static str,
    date: &'static str,
    start_time: &'static str,
    duration: &'static str,
    footer: &'static str,
    closing: &'static str,
}

const CUSTOMER_ES: Labels = Labels {
    subject: "Hemos recibido tu solicitud de cita",
    name: "Nombre",
    email: "Correo",
    phone: "Teléfono",
    service: "Servicio",
    date: "Fecha",
    start_time: "Hora inicio",
    duration: "Duración",
    footer: "Te contactaremos pronto para confirmar tu cita.",
    closing: "Saludos",
};

const CUSTOMER_EN: Labels = Labels {
    subject: "We have received your appointment request",
    name: "Name",
    email: "Email",
    phone: "Phone",
    service: "Service",
    date: "Date",
    start_time: "Start time",
    duration: "Duration",
    footer: "We will contact you soon to confirm your appointment.",
    closing: "Best regards",
};

const OWNER: Labels = Labels {
    subject: OWNER_BOOKING_SUBJECT,
    footer: "Revisar detalles y confirmar la cita.",
    ..CUSTOMER_ES
};

fn labels_for(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Es => &CUSTOMER_ES,
        Locale::En => &CUSTOMER_EN,
    }
}

fn booking_fields(labels: &Labels, appointment: &NewAppointment) -> Vec<LabeledField> {
    vec![
        LabeledField::new(labels.name, &appointment.customer_name),
        LabeledField::new(labels.email, &appointment.customer_email),
        LabeledField::new(labels.phone, &appointment.customer_phone),
        LabeledField::new(labels.service, &appointment.service_type),
        LabeledField::new(labels.date, appointment.date.format(DATE_FORMAT).to_string()),
        LabeledField::new(
            labels.start_time,
            appointment.start_time.format(TIME_FORMAT).to_string(),
        ),
        LabeledField::new(labels.duration, format!("{}h", appointment.duration_hours)),
    ]
}

/// Acknowledgement sent to the customer who booked.
pub fn customer_booking(appointment: &NewAppointment, locale: Locale) -> Notification {
    let labels = labels_for(locale);
    Notification {
        to: appointment.customer_email.clone(),
        reply_to: None,
        subject: labels.subject.to_string(),
        fields: booking_fields(labels, appointment),
        footer: labels.footer.to_string(),
        closing: labels.closing.to_string(),
    }
}

/// Alert sent to the salon owner; replies go to the customer.
pub fn owner_booking(appointment: &NewAppointment, owner_email: &str) -> Notification {
    Notification {
        to: owner_email.to_string(),
        reply_to: Some(appointment.customer_email.clone()),
        subject: OWNER.subject.to_string(),
        fields: booking_fields(&OWNER, appointment),
        footer: OWNER.footer.to_string(),
        closing: OWNER.closing.to_string(),
    }
}

/// Contact-page message forwarded to the salon owner.
pub fn owner_contact(name: &str, email: &str, message: &str, owner_email: &str) -> Notification {
    Notification {
        to: owner_email.to_string(),
        reply_to: Some(email.to_string()),
        subject: format!("Nuevo mensaje de contacto de {name}"),
        fields: vec![
            LabeledField::new("Nombre", name),
            LabeledField::new("Correo", email),
            LabeledField::new("Mensaje", message),
        ],
        footer: "Responde directamente a este correo para contestar.".to_string(),
        closing: "Saludos".to_string(),
    }
}

/// Plain-text body of a notification.
pub fn render_text(notification: &Notification) -> String {
    let mut body = String::new();
    for field in &notification.fields {
        body.push_str(&field.label);
        body.push_str(": ");
        body.push_str(&field.value);
        body.push('\n');
    }
    body.push('\n');
    body.push_str(&notification.footer);
    body.push_str("\n\n");
    body.push_str(&notification.closing);
    body.push('\n');
    body
}
