//! Health pipeline values and RPC response structures

use serde::{Deserialize, Serialize};

use crate::constants::messages::NOT_AVAILABLE;

/// Immutable view of the local node, fetched fresh on every poll.
///
/// Every field is rendered text; anything the node did not report holds the
/// `Not available` marker rather than failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node_id: String,
    pub moniker: String,
    pub listen_addr: String,
    pub network: String,
    pub version: String,
    pub latest_block_height: String,
    pub latest_block_time: String,
    pub catching_up: bool,
    pub validator_address: String,
    pub voting_power: String,
    pub proposer_priority: String,
}

impl NodeSnapshot {
    /// Snapshot with every field set to the `Not available` marker
    pub fn unavailable() -> Self {
        Self {
            node_id: NOT_AVAILABLE.to_string(),
            moniker: NOT_AVAILABLE.to_string(),
            listen_addr: NOT_AVAILABLE.to_string(),
            network: NOT_AVAILABLE.to_string(),
            version: NOT_AVAILABLE.to_string(),
            latest_block_height: NOT_AVAILABLE.to_string(),
            latest_block_time: NOT_AVAILABLE.to_string(),
            catching_up: false,
            validator_address: NOT_AVAILABLE.to_string(),
            voting_power: NOT_AVAILABLE.to_string(),
            proposer_priority: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Network height as answered by one reference endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceHeight {
    pub height: u64,
    pub source_endpoint: String,
    /// Position of the answering endpoint in failover order (0 = primary)
    pub source_index: usize,
}

impl ReferenceHeight {
    pub fn is_primary(&self) -> bool {
        self.source_index == 0
    }
}

/// Result of comparing local and reference heights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncVerdict {
    pub synced: bool,
    pub local_height: u64,
    pub reference_height: u64,
    pub deficit: u64,
}

/// CometBFT `/status` response. Every level is optional so that a partial
/// payload still yields a snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    pub result: Option<StatusResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResult {
    #[serde(default)]
    pub node_info: Option<NodeInfo>,
    #[serde(default)]
    pub sync_info: Option<SyncInfo>,
    #[serde(default)]
    pub validator_info: Option<ValidatorInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeInfo {
    pub id: Option<String>,
    pub listen_addr: Option<String>,
    pub network: Option<String>,
    pub version: Option<String>,
    pub moniker: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub latest_block_height: Option<String>,
    pub latest_block_time: Option<String>,
    pub catching_up: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidatorInfo {
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub voting_power: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub proposer_priority: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

// Heights and powers are decimal strings on CometBFT but plain numbers on
// some forks.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn or_marker(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl From<StatusResult> for NodeSnapshot {
    fn from(result: StatusResult) -> Self {
        let node_info = result.node_info.unwrap_or_default();
        let sync_info = result.sync_info.unwrap_or_default();
        let validator_info = result.validator_info.unwrap_or_default();

        Self {
            node_id: or_marker(node_info.id),
            moniker: or_marker(node_info.moniker),
            listen_addr: or_marker(node_info.listen_addr),
            network: or_marker(node_info.network),
            version: or_marker(node_info.version),
            latest_block_height: or_marker(sync_info.latest_block_height),
            latest_block_time: or_marker(sync_info.latest_block_time),
            catching_up: sync_info.catching_up.unwrap_or(false),
            validator_address: or_marker(validator_info.address),
            voting_power: or_marker(validator_info.voting_power),
            proposer_priority: or_marker(validator_info.proposer_priority),
        }
    }
}
