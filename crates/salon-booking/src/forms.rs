// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form payloads and their validation.
//!
//! Every validator collects all field errors before returning, so a client
//! can highlight each bad field in one round trip.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use salon_core::{FieldError, Locale, NewCategory, SalonError, ServiceDraft};

/// Venezuelan landline (02xx) or mobile (04xx) number, 11 digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0(2\d{2}|4\d{2})\d{7}$").expect("valid phone regex"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const NAME_MIN_CHARS: usize = 3;

/// A customer's booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    /// Requested start; minutes and seconds are discarded.
    pub start: NaiveDateTime,
    #[serde(default)]
    pub locale: Locale,
}

/// A message sent through the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

struct Collector(Vec<FieldError>);

impl Collector {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError::new(field, message));
    }

    fn name(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.push("name", "name is required");
        } else if value.chars().count() < NAME_MIN_CHARS {
            self.push("name", "name must be at least 3 characters");
        }
    }

    fn email(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.push("email", "email is required");
        } else if !EMAIL_PATTERN.is_match(value) {
            self.push("email", "email is not a valid address");
        }
    }

    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, &format!("{field} is required"));
        }
    }

    fn finish(self) -> Result<(), SalonError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(SalonError::Validation(self.0))
        }
    }
}

/// Validates a booking request against the offered service types.
pub fn validate_booking(request: &BookingRequest, service_types: &[String]) -> Result<(), SalonError> {
    let mut errors = Collector::new();
    errors.name(&request.name);

    let phone = request.phone.trim();
    if phone.is_empty() {
        errors.push("phone", "phone is required");
    } else if !PHONE_PATTERN.is_match(phone) {
        errors.push("phone", "phone must be a Venezuelan number such as 04121234567");
    }

    errors.email(&request.email);

    let service = request.service.trim();
    if service.is_empty() {
        errors.push("service", "service is required");
    } else if !service_types.iter().any(|s| s == service) {
        errors.push("service", "service is not offered");
    }

    errors.finish()
}

pub fn validate_contact(form: &ContactForm) -> Result<(), SalonError> {
    let mut errors = Collector::new();
    errors.name(&form.name);
    errors.email(&form.email);
    errors.required("message", &form.message);
    errors.finish()
}

pub fn validate_category(category: &NewCategory) -> Result<(), SalonError> {
    let mut errors = Collector::new();
    errors.required("name_es", &category.name_es);
    errors.required("name_en", &category.name_en);
    errors.finish()
}

/// Validates a service draft; returns the category id it must belong to.
pub fn validate_service(draft: &ServiceDraft) -> Result<i64, SalonError> {
    let mut errors = Collector::new();
    errors.required("title_es", &draft.title_es);
    errors.required("title_en", &draft.title_en);
    errors.required("description_es", &draft.description_es);
    errors.required("description_en", &draft.description_en);
    if !(draft.price.is_finite() && draft.price > 0.0) {
        errors.push("price", "price must be positive");
    }
    if draft.category_id.is_none() {
        errors.push("category_id", "category is required");
    }
    errors.finish()?;
    draft
        .category_id
        .ok_or_else(|| SalonError::Internal("category id vanished after validation".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> Vec<String> {
        vec!["soft-gel".to_string(), "kapping".to_string()]
    }

    fn request() -> BookingRequest {
        BookingRequest {
            name: "Ana Pérez".into(),
            email: "ana@example.com".into(),
            phone: "04121234567".into(),
            service: "soft-gel".into(),
            start: NaiveDateTime::parse_from_str("2026-03-12 10:00", "%Y-%m-%d %H:%M").unwrap(),
            locale: Locale::Es,
        }
    }

    fn fields(err: SalonError) -> Vec<String> {
        match err {
            SalonError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_booking_passes() {
        assert!(validate_booking(&request(), &services()).is_ok());
    }

    #[test]
    fn landline_numbers_are_accepted() {
        let mut r = request();
        r.phone = "02121234567".into();
        assert!(validate_booking(&r, &services()).is_ok());
    }

    #[test]
    fn bad_phone_numbers_are_rejected() {
        for phone in ["", "4121234567", "03121234567", "0412123456", "+584121234567"] {
            let mut r = request();
            r.phone = phone.into();
            let err = validate_booking(&r, &services()).unwrap_err();
            assert_eq!(fields(err), vec!["phone"], "phone {phone:?}");
        }
    }

    #[test]
    fn every_bad_field_is_reported() {
        let r = BookingRequest {
            name: "Al".into(),
            email: "not-an-email".into(),
            phone: "123".into(),
            service: "haircut".into(),
            ..request()
        };
        let err = validate_booking(&r, &services()).unwrap_err();
        assert_eq!(fields(err), vec!["name", "phone", "email", "service"]);
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut r = request();
        r.name = "Íñ".into();
        assert!(validate_booking(&r, &services()).is_err());
        r.name = "Íña".into();
        assert!(validate_booking(&r, &services()).is_ok());
    }

    #[test]
    fn contact_requires_message() {
        let form = ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            message: "  ".into(),
        };
        assert_eq!(fields(validate_contact(&form).unwrap_err()), vec!["message"]);
    }

    #[test]
    fn category_requires_both_names() {
        let cat = NewCategory {
            name_es: "Uñas".into(),
            name_en: String::new(),
        };
        assert_eq!(fields(validate_category(&cat).unwrap_err()), vec!["name_en"]);
    }

    #[test]
    fn service_draft_rules() {
        let draft = ServiceDraft {
            category_id: None,
            title_es: "Gel".into(),
            title_en: "Gel".into(),
            description_es: String::new(),
            description_en: "Gel nails".into(),
            price: 0.0,
        };
        assert_eq!(
            fields(validate_service(&draft).unwrap_err()),
            vec!["description_es", "price", "category_id"]
        );

        let ok = ServiceDraft {
            category_id: Some(7),
            description_es: "Uñas de gel".into(),
            price: 15.0,
            ..draft
        };
        assert_eq!(validate_service(&ok).unwrap(), 7);
    }

    #[test]
    fn booking_request_deserializes_without_locale() {
        let json = r#"{
            "name": "Ana", "email": "ana@example.com", "phone": "04121234567",
            "service": "kapping", "start": "2026-03-12T10:30:00"
        }"#;
        let r: BookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(r.locale, Locale::Es);
    }
}
