//! Central repository for timeouts, intervals, and size limits
//!
//! Constants are grouped by the component that consumes them so that the
//! config layer, the pipeline and the tests all agree on a single value.

use std::time::Duration;

/// HTTP client timeout constants
pub mod http {
    use super::Duration;

    /// Timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Timeout for a single webhook delivery
    pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Chat transport size limits
pub mod messages {
    /// Hard limit of a single delivered message, in characters
    pub const MESSAGE_LIMIT: usize = 4096;

    /// Budget used when pre-splitting an oversized report
    pub const CHUNK_BUDGET: usize = 4000;

    /// Marker substituted for any field the node did not report
    pub const NOT_AVAILABLE: &str = "Not available";
}

/// Default configuration values
pub mod defaults {
    /// Default bind host for the command API
    pub const API_HOST: &str = "127.0.0.1";

    /// Default port for the command API
    pub const API_PORT: u16 = 8096;

    /// Default host of the local node status endpoint
    pub const NODE_STATUS_HOST: &str = "localhost";

    /// Default CometBFT RPC port of the local node
    pub const NODE_STATUS_PORT: u16 = 26657;

    /// Default polling interval for an active monitoring session
    pub const MONITORING_INTERVAL_SECONDS: u64 = 300;

    /// Delay before the first tick of a freshly activated session
    pub const INITIAL_DELAY_SECONDS: u64 = 10;

    /// Default RPC timeout in seconds
    pub const RPC_TIMEOUT_SECONDS: u64 = 10;

    /// Number of journal lines returned by the logs command
    pub const LOG_LINES: u32 = 100;

    /// Filesystem reported in the disk usage block
    pub const DISK_MOUNT_POINT: &str = "/";

    /// Consensus client binary queried for its version
    pub const NODE_BINARY: &str = "story";

    /// Execution client binary queried for its version
    pub const EXECUTION_BINARY: &str = "story-geth";
}

/// Bytes per GiB, used when rendering disk and memory figures
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;
