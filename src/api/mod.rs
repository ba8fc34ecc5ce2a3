// HTTP client for the provisioning backend. One request, no retries, no
// idempotency keys; the blanket timeout from config is the only knob.
// Failures fall into three buckets: the server answered with an error body,
// the request went out but nothing came back, or the request could not be
// built at all. Each maps to one fixed user-facing message.

pub mod auth;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::config::session;
use crate::infra::payload::SubmissionPayload;

/// The backend wraps every response in this envelope; only the success flag
/// and the message/error strings are consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiEnvelope {
    /// Best human-readable line this envelope has to offer.
    pub fn display_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

pub(crate) fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config::API_TIMEOUT)
        .build()
        .context("Failed to construct API client")
}

/// POST the assembled plan to the infrastructure submission endpoint.
pub async fn submit_infrastructure(payload: &SubmissionPayload) -> Result<ApiEnvelope> {
    let client = build_client()?;
    let url = format!("{}/api/v1/customer-survey/infra", config::api_base_url());

    let mut request = client.post(&url).json(payload);
    if let Some(token) = session::auth_token() {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .context("Network error - no response from server")?;

    if !response.status().is_success() {
        let status = response.status();
        let envelope: ApiEnvelope = response.json().await.unwrap_or_default();
        match envelope.display_message() {
            Some(message) => anyhow::bail!("Submission failed ({}): {}", status, message),
            None => anyhow::bail!("Submission failed ({})", status),
        }
    }

    response
        .json()
        .await
        .context("Failed to parse submission response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_sparse_bodies() {
        let envelope: ApiEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.success);
        assert!(envelope.display_message().is_none());

        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success":true,"message":"queued"}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.display_message(), Some("queued"));

        // error string is the fallback when no message is present
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success":false,"error":"bad vpc"}"#).unwrap();
        assert_eq!(envelope.display_message(), Some("bad vpc"));
    }
}
