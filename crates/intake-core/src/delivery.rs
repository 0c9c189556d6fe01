//! Posting finished records to the intake server
//!
//! Delivery is fire-and-forget: once the request leaves without a transport
//! error the record counts as delivered. The response status and body are
//! never inspected, so failures on the server side after dispatch are not
//! visible here. There are no retries; the patient resubmits.

use intake_types::CanonicalRecord;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("儲存失敗，請稍後再試：{0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client bound to one intake endpoint
#[derive(Debug, Clone)]
pub struct IntakeClient {
    endpoint: String,
    http: reqwest::Client,
}

impl IntakeClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Use a preconfigured client (proxies, timeouts)
    pub fn with_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    /// POST the record as JSON
    pub async fn dispatch(&self, record: &CanonicalRecord) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to dispatch intake record: {}", e);
                DeliveryError::Transport(e)
            })?;

        debug!(
            "Intake record dispatched to {} (status {} not checked)",
            self.endpoint,
            response.status()
        );
        Ok(())
    }
}
