// File: monitor/src/config/mod.rs
pub mod manager;
pub use manager::ConfigManager;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{defaults, messages};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_node_status_host")]
    pub node_status_host: String,
    #[serde(default = "default_node_status_port")]
    pub node_status_port: u16,
    // Ordered, primary first
    #[serde(default)]
    pub reference_endpoints: Vec<String>,
    #[serde(default = "default_monitoring_interval")]
    pub monitoring_interval_seconds: u64,
    #[serde(default = "default_initial_delay")]
    pub initial_delay_seconds: u64,
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_seconds: u64,
    #[serde(default = "default_message_limit")]
    pub message_limit: usize,
    #[serde(default = "default_chunk_budget")]
    pub chunk_budget: usize,
    #[serde(default)]
    pub notification_webhook_url: String,
    // systemd units shown in reports and accepted by restart/logs
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default = "default_log_lines")]
    pub log_lines: u32,
    #[serde(default = "default_disk_mount_point")]
    pub disk_mount_point: String,
    // Bearer token for every /api route; empty rejects all calls
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_node_binary")]
    pub node_binary: String,
    #[serde(default = "default_execution_binary")]
    pub execution_binary: String,
}

fn default_host() -> String {
    defaults::API_HOST.to_string()
}

fn default_port() -> u16 {
    defaults::API_PORT
}

fn default_node_status_host() -> String {
    defaults::NODE_STATUS_HOST.to_string()
}

fn default_node_status_port() -> u16 {
    defaults::NODE_STATUS_PORT
}

fn default_monitoring_interval() -> u64 {
    defaults::MONITORING_INTERVAL_SECONDS
}

fn default_initial_delay() -> u64 {
    defaults::INITIAL_DELAY_SECONDS
}

fn default_rpc_timeout() -> u64 {
    defaults::RPC_TIMEOUT_SECONDS
}

fn default_message_limit() -> usize {
    messages::MESSAGE_LIMIT
}

fn default_chunk_budget() -> usize {
    messages::CHUNK_BUDGET
}

fn default_log_lines() -> u32 {
    defaults::LOG_LINES
}

fn default_disk_mount_point() -> String {
    defaults::DISK_MOUNT_POINT.to_string()
}

fn default_node_binary() -> String {
    defaults::NODE_BINARY.to_string()
}

fn default_execution_binary() -> String {
    defaults::EXECUTION_BINARY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            node_status_host: default_node_status_host(),
            node_status_port: default_node_status_port(),
            reference_endpoints: Vec::new(),
            monitoring_interval_seconds: default_monitoring_interval(),
            initial_delay_seconds: default_initial_delay(),
            rpc_timeout_seconds: default_rpc_timeout(),
            message_limit: default_message_limit(),
            chunk_budget: default_chunk_budget(),
            notification_webhook_url: String::new(),
            services: Vec::new(),
            log_lines: default_log_lines(),
            disk_mount_point: default_disk_mount_point(),
            api_key: String::new(),
            node_binary: default_node_binary(),
            execution_binary: default_execution_binary(),
        }
    }
}

impl Config {
    /// URL of the local node's status endpoint
    pub fn node_status_url(&self) -> String {
        format!(
            "http://{}:{}/status",
            self.node_status_host, self.node_status_port
        )
    }

    pub fn monitoring_interval(&self) -> Duration {
        Duration::from_secs(self.monitoring_interval_seconds)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_seconds)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }

    pub fn is_watched_service(&self, unit: &str) -> bool {
        self.services.iter().any(|s| s == unit)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference_endpoints.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "reference_endpoints".to_string(),
            });
        }

        if let Some(bad) = self
            .reference_endpoints
            .iter()
            .find(|url| !(url.starts_with("http://") || url.starts_with("https://")))
        {
            return Err(ConfigError::InvalidValue {
                field: "reference_endpoints".to_string(),
                reason: format!("'{}' is not an http(s) URL", bad),
            });
        }

        if self.monitoring_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monitoring_interval_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.rpc_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rpc_timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.chunk_budget == 0 || self.chunk_budget > self.message_limit {
            return Err(ConfigError::InvalidValue {
                field: "chunk_budget".to_string(),
                reason: format!(
                    "must be between 1 and message_limit ({}), got {}",
                    self.message_limit, self.chunk_budget
                ),
            });
        }

        Ok(())
    }
}
