use crate::core::submission::REJECTED_FALLBACK;
use crate::domain::model::{Ack, LeadRequest};
use crate::domain::ports::LeadGateway;
use crate::utils::error::SubmitError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// POSTs leads as JSON to the intake endpoint.
#[derive(Debug, Clone)]
pub struct HttpLeadGateway {
    client: Client,
    endpoint: String,
}

impl HttpLeadGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadGateway for HttpLeadGateway {
    async fn submit_lead(&self, lead: &LeadRequest) -> Result<Ack, SubmitError> {
        tracing::debug!("Posting lead to: {}", self.endpoint);

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(lead)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Lead endpoint response status: {}", status);

        if status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(serde_json::from_str(&body).unwrap_or_default());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| REJECTED_FALLBACK.to_string());

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
