//! This module provides reusable test utilities:
//! - Mock HTTP servers (node status RPC, notification webhook)
//! - Test configuration builders
//! - In-memory fakes for host collaborators and notification sinks

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fakes;
pub mod mock_rpc;
pub mod mock_webhook;
pub mod test_config;

// Re-export commonly used items
pub use fakes::{FakeMetrics, FakeServiceController, RecordingSink};
pub use mock_rpc::{status_body, MockRpcServer};
pub use mock_webhook::MockWebhookServer;
pub use test_config::{test_config, TestConfigBuilder, TEST_API_KEY};
