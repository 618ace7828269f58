//! Pushover adapter: one blocking HTTPS POST per notification.

use std::time::Duration;

use crate::core::errors::Result;
use crate::notify::{Delivery, Notification, Notifier};

/// Production messages endpoint.
pub const MESSAGES_ENDPOINT: &str = "https://api.pushover.net/1/messages.json";

/// Upper bound on one send, connection included. Generous because the
/// monitor has nothing else to do while a send is in flight.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking Pushover client. One instance lives for the whole monitor
/// run so the underlying connection pool can be reused across rings.
#[derive(Debug, Clone)]
pub struct PushoverClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl PushoverClient {
    /// Client against the production endpoint.
    ///
    /// # Errors
    /// Returns a send-failure error when the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(MESSAGES_ENDPOINT)
    }

    /// Client against an explicit endpoint. Tests point this at a local
    /// listener.
    ///
    /// # Errors
    /// Returns a send-failure error when the TLS backend cannot be
    /// initialized.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Notifier for PushoverClient {
    fn notify(&self, note: &Notification) -> Result<Delivery> {
        let response = self
            .http
            .post(&self.endpoint)
            .form(&note.form_fields())
            .send()?;
        let status = response.status();
        Ok(Delivery {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}
