//! Mock RPC server for testing node status and reference height lookups
//!
//! This simulates CometBFT `/status` responses without requiring a real node.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Full `/status` body for a node at `height`
pub fn status_body(network: &str, height: u64, catching_up: bool) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": -1,
        "result": {
            "node_info": {
                "id": "4f1c2a9d0e7b",
                "listen_addr": "tcp://0.0.0.0:26656",
                "network": network,
                "version": "0.38.12",
                "moniker": "test-validator"
            },
            "sync_info": {
                "latest_block_height": height.to_string(),
                "latest_block_time": "2024-05-01T12:00:00.000000000Z",
                "catching_up": catching_up
            },
            "validator_info": {
                "address": "A1B2C3D4E5F6",
                "voting_power": "1000",
                "proposer_priority": "-250"
            }
        }
    })
}

/// Mock RPC server that simulates a node's `/status` endpoint
pub struct MockRpcServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockRpcServer {
    /// Create a new mock RPC server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// URL of the mocked `/status` endpoint
    pub fn status_url(&self) -> String {
        format!("{}/status", self.base_url)
    }

    pub fn port(&self) -> u16 {
        self.server.address().port()
    }

    /// Mock healthy synced node
    pub async fn mock_height(&self, height: u64) {
        self.mock_body(status_body("test-chain-1", height, false))
            .await;
    }

    /// Mock node that is catching up (syncing)
    pub async fn mock_catching_up(&self, height: u64) {
        self.mock_body(status_body("test-chain-1", height, true))
            .await;
    }

    /// Mock an arbitrary JSON body with status 200
    pub async fn mock_body(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a non-JSON body with status 200
    pub async fn mock_raw(&self, body: &str) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mock unhealthy node (server error)
    pub async fn mock_unhealthy(&self) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Mock a node that answers only after `delay`
    pub async fn mock_slow(&self, height: u64, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(status_body("test-chain-1", height, false))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of requests this server has seen
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
