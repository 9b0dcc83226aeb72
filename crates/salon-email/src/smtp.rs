// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier implementations.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use salon_config::model::EmailConfig;
use salon_core::{Adapter, AdapterType, HealthStatus, Notification, Notifier, SalonError};

use crate::templates::render_text;

fn notify_err<E>(message: impl Into<String>, err: E) -> SalonError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SalonError::Notification {
        message: message.into(),
        source: Some(Box::new(err)),
    }
}

/// Sends notifications through an SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Builds the transport. Requires `smtp_host` and `from_address`.
    pub fn new(config: &EmailConfig) -> Result<Self, SalonError> {
        let host = config
            .smtp_host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| SalonError::Config("email.smtp_host is required".into()))?;
        let from = config
            .from_address
            .as_deref()
            .ok_or_else(|| SalonError::Config("email.from_address is required".into()))?
            .parse::<Mailbox>()
            .map_err(|e| SalonError::Config(format!("email.from_address: {e}")))?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        }
        .map_err(|e| notify_err(format!("cannot reach SMTP relay {host}"), e))?
        .port(config.smtp_port);

        let builder = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => {
                builder.credentials(Credentials::new(user.clone(), pass.clone()))
            }
            _ => builder,
        };

        debug!(host, port = config.smtp_port, starttls = config.starttls, "SMTP notifier ready");
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, SalonError> {
        let to = notification
            .to
            .parse::<Mailbox>()
            .map_err(|e| notify_err(format!("invalid recipient `{}`", notification.to), e))?;
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        if let Some(reply_to) = &notification.reply_to {
            let mailbox = reply_to
                .parse::<Mailbox>()
                .map_err(|e| notify_err(format!("invalid reply-to `{reply_to}`"), e))?;
            builder = builder.reply_to(mailbox);
        }
        builder
            .body(render_text(notification))
            .map_err(|e| notify_err("building email", e))
    }
}

#[async_trait]
impl Adapter for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, SalonError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Degraded("SMTP relay refused NOOP".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("SMTP relay unreachable: {e}"))),
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), SalonError> {
        let message = self.build_message(notification)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| notify_err(format!("sending to {}", notification.to), e))?;
        info!(to = %notification.to, subject = %notification.subject, "email sent");
        Ok(())
    }
}

/// Used when email is switched off: logs what would have been sent.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Adapter for DisabledNotifier {
    fn name(&self) -> &str {
        "disabled"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, SalonError> {
        Ok(HealthStatus::Degraded("email delivery disabled".into()))
    }
}

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), SalonError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "email disabled, notification dropped"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_core::LabeledField;

    fn config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            smtp_host: Some("smtp.example.com".into()),
            smtp_port: 2525,
            username: Some("user".into()),
            password: Some("secret".into()),
            from_address: Some("Salon <citas@example.com>".into()),
            starttls: true,
        }
    }

    fn notification(to: &str) -> Notification {
        Notification {
            to: to.into(),
            reply_to: Some("ana@example.com".into()),
            subject: "Nueva cita solicitada".into(),
            fields: vec![LabeledField::new("Nombre", "Ana")],
            footer: "Revisar detalles y confirmar la cita.".into(),
            closing: "Saludos".into(),
        }
    }

    #[tokio::test]
    async fn new_requires_host_and_sender() {
        let mut missing_host = config();
        missing_host.smtp_host = None;
        assert!(matches!(
            SmtpNotifier::new(&missing_host),
            Err(SalonError::Config(_))
        ));

        let mut bad_from = config();
        bad_from.from_address = Some("not an address".into());
        assert!(matches!(SmtpNotifier::new(&bad_from), Err(SalonError::Config(_))));
    }

    #[tokio::test]
    async fn message_carries_headers_and_body() {
        let notifier = SmtpNotifier::new(&config()).unwrap();
        let message = notifier.build_message(&notification("owner@example.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("Reply-To: ana@example.com"));
        assert!(raw.contains("Subject: Nueva cita solicitada"));
        assert!(raw.contains("Nombre: Ana"));
    }

    #[tokio::test]
    async fn bad_recipient_is_a_notification_error() {
        let notifier = SmtpNotifier::new(&config()).unwrap();
        let err = notifier.build_message(&notification("nobody")).unwrap_err();
        assert!(matches!(err, SalonError::Notification { .. }));
    }

    #[tokio::test]
    async fn disabled_notifier_accepts_everything() {
        let notifier = DisabledNotifier;
        notifier.send(&notification("owner@example.com")).await.unwrap();
        assert_eq!(notifier.adapter_type(), AdapterType::Notifier);
    }
}
