//! Read-only client for the local node's `/status` endpoint

use reqwest::Client;
use tracing::debug;

use super::types::{NodeSnapshot, StatusResponse};
use crate::errors::HealthError;

/// Fetches a fresh [`NodeSnapshot`] per call. No retries: the scheduling
/// cadence is the retry policy.
#[derive(Clone)]
pub struct NodeStatusClient {
    client: Client,
    status_url: String,
}

impl NodeStatusClient {
    pub fn new(client: Client, status_url: impl Into<String>) -> Self {
        Self {
            client,
            status_url: status_url.into(),
        }
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    pub async fn fetch_snapshot(&self) -> Result<NodeSnapshot, HealthError> {
        debug!("Fetching node status from {}", self.status_url);

        let response = self
            .client
            .get(&self.status_url)
            .send()
            .await
            .map_err(|e| HealthError::NodeUnreachable {
                url: self.status_url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(HealthError::NodeUnreachable {
                url: self.status_url.clone(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let body: StatusResponse =
            response
                .json()
                .await
                .map_err(|e| HealthError::MalformedResponse {
                    url: self.status_url.clone(),
                    reason: format!("Failed to parse JSON response: {}", e),
                })?;

        match (body.result, body.error) {
            (Some(result), _) => Ok(NodeSnapshot::from(result)),
            (None, Some(error)) => Err(HealthError::MalformedResponse {
                url: self.status_url.clone(),
                reason: format!("RPC error {}: {}", error.code, error.message),
            }),
            (None, None) => Err(HealthError::MalformedResponse {
                url: self.status_url.clone(),
                reason: "response has no 'result' object".to_string(),
            }),
        }
    }
}
