//! Notification Dispatcher
//!
//! Out-of-band delivery (mail) of messages such as password reset links.

use thiserror::Error;

/// A message addressed to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification channel is not configured")]
    Unconfigured,

    #[error("Invalid recipient or sender address: {0}")]
    InvalidAddress(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Notification dispatcher trait
#[trait_variant::make(NotificationDispatcher: Send)]
pub trait LocalNotificationDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<(), NotificationError>;
}
