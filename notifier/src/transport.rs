use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use roi_engine::EmailData;
use thiserror::Error;

use crate::config::EmailJsConfig;

/// REST endpoint of the hosted send-mail service.
const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Errors surfaced by a delivery attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("email service rejected the request: {status} {body}")]
    Rejected {
        /// HTTP status code returned.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// The request never reached the service.
    #[error("network failure talking to email service: {0}")]
    Network(String),
}

/// Minimal acknowledgement of an accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAck {
    /// HTTP status reported by the service.
    pub status: u16,
    /// When the acknowledgement was observed.
    pub at: DateTime<Utc>,
}

/// One-shot email delivery capability.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts to deliver one payload. Implementations never retry.
    async fn send(&self, payload: &EmailData) -> Result<DeliveryAck, TransportError>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailData,
}

/// EmailJS-compatible REST transport.
#[derive(Debug, Clone)]
pub struct EmailJsNotifier {
    config: EmailJsConfig,
    client: reqwest::Client,
    endpoint: String,
}

impl EmailJsNotifier {
    /// Creates a transport for the given account configuration.
    #[must_use]
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            endpoint: EMAILJS_ENDPOINT.to_owned(),
        }
    }

    /// Overrides the service endpoint (tests and self-hosted setups).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Recipient address configured for this transport.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.config.to_email
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn send(&self, payload: &EmailData) -> Result<DeliveryAck, TransportError> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: payload,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "email accepted by service");
            Ok(DeliveryAck {
                status: status.as_u16(),
                at: Utc::now(),
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// In-memory transport recording every payload; used in tests and local
/// development.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    sent: Arc<Mutex<Vec<EmailData>>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    /// Snapshot of payloads accepted so far.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailData> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn send(&self, payload: &EmailData) -> Result<DeliveryAck, TransportError> {
        if *self.failing.lock() {
            return Err(TransportError::Network("injected failure".to_owned()));
        }
        self.sent.lock().push(payload.clone());
        Ok(DeliveryAck {
            status: 200,
            at: Utc::now(),
        })
    }
}
