// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact page messages, forwarded to the salon owner by email.

use std::sync::Arc;

use tracing::info;

use salon_core::{Notifier, SalonError};
use salon_email::templates;

use crate::forms::{validate_contact, ContactForm};

pub struct ContactService {
    notifier: Arc<dyn Notifier>,
    owner_email: Option<String>,
}

impl ContactService {
    pub fn new(notifier: Arc<dyn Notifier>, owner_email: Option<String>) -> Self {
        Self {
            notifier,
            owner_email,
        }
    }

    pub async fn contact(&self, form: &ContactForm) -> Result<(), SalonError> {
        validate_contact(form)?;
        let owner = self
            .owner_email
            .as_deref()
            .ok_or_else(|| SalonError::Config("salon.owner_email is not set".into()))?;
        let notification = templates::owner_contact(
            form.name.trim(),
            form.email.trim(),
            form.message.trim(),
            owner,
        );
        self.notifier.send(&notification).await?;
        info!(from = %form.email.trim(), "contact message forwarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_test_utils::RecordingNotifier;

    fn form() -> ContactForm {
        ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            message: "¿Hacen diseños personalizados?".into(),
        }
    }

    #[tokio::test]
    async fn forwards_to_owner_with_reply_to() {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = ContactService::new(notifier.clone(), Some("owner@example.com".into()));
        service.contact(&form()).await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].reply_to.as_deref(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = ContactService::new(notifier.clone(), Some("owner@example.com".into()));
        let mut bad = form();
        bad.email = "nope".into();
        assert!(matches!(service.contact(&bad).await, Err(SalonError::Validation(_))));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_is_returned() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let service = ContactService::new(notifier, Some("owner@example.com".into()));
        assert!(matches!(
            service.contact(&form()).await,
            Err(SalonError::Notification { .. })
        ));
    }

    #[tokio::test]
    async fn missing_owner_is_a_config_error() {
        let service = ContactService::new(Arc::new(RecordingNotifier::new()), None);
        assert!(matches!(service.contact(&form()).await, Err(SalonError::Config(_))));
    }
}
