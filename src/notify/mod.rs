//! Notification payloads and the delivery seam.
//!
//! A [`Notification`] is built fresh on every trigger and discarded after
//! one send. The wire format is owned by the provider adapter in
//! [`pushover`]; the monitor only sees [`Notifier`] and [`Delivery`].

use std::fmt;

use crate::core::config::Credentials;
use crate::core::errors::Result;

pub mod pushover;

/// Static notification title.
pub const DOORBELL_TITLE: &str = "Doorbell!";

/// Static notification body.
pub const DOORBELL_MESSAGE: &str = "Somebody just rang the doorbell";

/// One outbound push notification: exactly the four fields the provider's
/// messages endpoint takes, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Application token.
    pub token: String,
    /// Recipient key.
    pub user: String,
    /// Title line shown on the device.
    pub title: String,
    /// Message body shown on the device.
    pub message: String,
}

impl Notification {
    /// The doorbell notification: caller credentials plus the fixed title
    /// and message.
    #[must_use]
    pub fn doorbell(credentials: &Credentials) -> Self {
        Self {
            token: credentials.token.clone(),
            user: credentials.user.clone(),
            title: DOORBELL_TITLE.to_string(),
            message: DOORBELL_MESSAGE.to_string(),
        }
    }

    /// Form fields in wire order, ready for url-encoding.
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("token", self.token.as_str()),
            ("user", self.user.as_str()),
            ("title", self.title.as_str()),
            ("message", self.message.as_str()),
        ]
    }
}

/// Synchronous response of one send: status code plus reason phrase,
/// surfaced to the operator whether or not the provider accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase for the status code.
    pub reason: String,
}

impl Delivery {
    /// Whether the provider accepted the notification (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status {}: {}", self.status, self.reason)
    }
}

/// Sends one notification and reports the provider's answer.
///
/// `Err` means the request never completed (connection, TLS, timeout);
/// a non-2xx answer is still `Ok` — it is reported, not retried.
pub trait Notifier {
    /// Deliver `note` synchronously.
    ///
    /// # Errors
    /// Returns a transient send failure when the request cannot complete.
    fn notify(&self, note: &Notification) -> Result<Delivery>;
}
