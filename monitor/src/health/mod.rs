//! Health monitoring module
//!
//! Leaves of the monitoring pipeline: the local node status client, the
//! reference height resolver with failover, and the sync evaluator.

pub mod evaluator;
pub mod node_client;
pub mod reference;
pub mod types;

pub use evaluator::evaluate;
pub use node_client::NodeStatusClient;
pub use reference::ReferenceHeightResolver;
pub use types::{NodeSnapshot, ReferenceHeight, SyncVerdict};

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

use crate::constants::http::CONNECT_TIMEOUT;

/// Create the HTTP client shared by the status client and the resolver
pub fn create_rpc_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))
}
