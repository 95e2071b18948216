//! Network reference height with strict sequential failover

use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::types::ReferenceHeight;
use crate::errors::HealthError;

/// Resolves the canonical latest block height from an ordered endpoint list.
///
/// Endpoints are tried one at a time in configured order and the first
/// success wins. There is no fan-out, no per-endpoint retry and no caching.
#[derive(Clone)]
pub struct ReferenceHeightResolver {
    client: Client,
    endpoints: Vec<String>,
}

impl ReferenceHeightResolver {
    pub fn new(client: Client, endpoints: Vec<String>) -> Self {
        Self { client, endpoints }
    }

    pub async fn resolve(&self) -> Result<ReferenceHeight, HealthError> {
        let mut failures = Vec::with_capacity(self.endpoints.len());

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            match self.attempt(endpoint).await {
                Ok(height) => {
                    info!(
                        "Latest block from reference endpoint #{} ({}): {}",
                        index + 1,
                        endpoint,
                        height
                    );
                    return Ok(ReferenceHeight {
                        height,
                        source_endpoint: endpoint.clone(),
                        source_index: index,
                    });
                }
                Err(e) => {
                    warn!("Reference endpoint #{} failed: {}", index + 1, e);
                    failures.push(e);
                }
            }
        }

        Err(HealthError::AllEndpointsUnavailable { failures })
    }

    async fn attempt(&self, endpoint: &str) -> Result<u64, HealthError> {
        let unavailable = |reason: String| HealthError::EndpointUnavailable {
            endpoint: endpoint.to_string(),
            reason,
        };

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| unavailable(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP {}", response.status())));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| unavailable(format!("Failed to parse JSON response: {}", e)))?;

        parse_latest_height(&json).map_err(unavailable)
    }
}

/// Extract `result.sync_info.latest_block_height` (decimal string or number)
pub fn parse_latest_height(json: &Value) -> Result<u64, String> {
    let field = &json["result"]["sync_info"]["latest_block_height"];

    match field {
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("Invalid block height '{}': {}", s, e)),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("Invalid block height '{}'", n)),
        Value::Null => Err("Block height not found in RPC response".to_string()),
        other => Err(format!("Invalid block height '{}'", other)),
    }
}
