//! Mail Notifier
//!
//! SMTP delivery via lettre, with a log-only fallback for development and
//! an explicit "unconfigured" mode that always fails.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};

use crate::domain::notification::{Notification, NotificationDispatcher, NotificationError};

/// SMTP relay settings
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// STARTTLS relay with credentials
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: settings.from_address.clone(),
        })
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| NotificationError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(notification
                .to
                .parse()
                .map_err(|_| NotificationError::InvalidAddress(notification.to.clone()))?)
            .subject(&notification.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        Ok(())
    }
}

/// Notification channel selected at startup
#[derive(Clone)]
pub enum MailNotifier {
    Smtp(SmtpNotifier),
    /// Write the message to the log instead of sending it
    Log,
    /// No channel; every dispatch fails
    Unconfigured,
}

impl MailNotifier {
    pub fn smtp(settings: &SmtpSettings) -> Result<Self, SmtpError> {
        SmtpNotifier::new(settings).map(Self::Smtp)
    }
}

impl NotificationDispatcher for MailNotifier {
    async fn dispatch(&self, notification: &Notification) -> Result<(), NotificationError> {
        match self {
            MailNotifier::Smtp(smtp) => {
                smtp.send(notification).await?;
                tracing::info!(subject = %notification.subject, "Notification sent");
                Ok(())
            }
            MailNotifier::Log => {
                tracing::info!(
                    to = %notification.to,
                    subject = %notification.subject,
                    body = %notification.body,
                    "Notification (log only)"
                );
                Ok(())
            }
            MailNotifier::Unconfigured => Err(NotificationError::Unconfigured),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Notification {
        Notification {
            to: "a@x.com".to_string(),
            subject: "Password Reset Request".to_string(),
            body: "http://localhost:3000/reset-password/abc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_mode_succeeds() {
        assert!(MailNotifier::Log.dispatch(&sample()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unconfigured_always_fails() {
        let result = MailNotifier::Unconfigured.dispatch(&sample()).await;
        assert!(matches!(result, Err(NotificationError::Unconfigured)));
    }

    #[tokio::test]
    async fn test_smtp_rejects_bad_sender_before_connecting() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "user".to_string(),
            password: "pass".to_string(),
            from_address: "not an address".to_string(),
        };
        let notifier = MailNotifier::smtp(&settings).unwrap();
        let result = notifier.dispatch(&sample()).await;
        assert!(matches!(result, Err(NotificationError::InvalidAddress(_))));
    }

    #[test]
    fn test_settings_debug_redacts_password() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "user".to_string(),
            password: "hunter22".to_string(),
            from_address: "shop@example.com".to_string(),
        };
        assert!(!format!("{:?}", settings).contains("hunter22"));
    }
}
