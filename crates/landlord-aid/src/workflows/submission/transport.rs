use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::workflows::records::APPLICATIONS_PATH;

/// What the endpoint sent back on a successful delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("submission rejected with status {status}")]
    Rejected { status: u16 },
}

/// Delivers a finished application to the persistence endpoint.
#[async_trait]
pub trait ApplicationTransport: Send + Sync {
    async fn send(&self, payload: &Value) -> Result<Acknowledgement, TransportError>;
}

/// Posts applications to `{base_url}/api/applications`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), APPLICATIONS_PATH);
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ApplicationTransport for HttpTransport {
    async fn send(&self, payload: &Value) -> Result<Acknowledgement, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }

        // The body is informational only; an unreadable acknowledgement still counts as delivered.
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        debug!(endpoint = %self.endpoint, status = status.as_u16(), "application delivered");
        Ok(Acknowledgement {
            status: status.as_u16(),
            body,
        })
    }
}
