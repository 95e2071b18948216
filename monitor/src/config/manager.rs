// File: monitor/src/config/manager.rs
use super::Config;
use crate::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// Environment variables recognised as overrides of `main.toml`
pub mod env {
    pub const SERVER_PORT: &str = "SERVER_PORT";
    pub const RPC_ENDPOINT_1: &str = "RPC_ENDPOINT_1";
    pub const RPC_ENDPOINT_2: &str = "RPC_ENDPOINT_2";
    pub const MONITORING_INTERVAL: &str = "MONITORING_INTERVAL";
    pub const STORY_SERVICE: &str = "STORY_SERVICE";
    pub const STORY_GETH_SERVICE: &str = "STORY_GETH_SERVICE";
    pub const NOTIFICATION_WEBHOOK_URL: &str = "NOTIFICATION_WEBHOOK_URL";
    pub const API_KEY: &str = "MONITOR_API_KEY";
}

#[derive(Debug)]
pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Load `<config_dir>/main.toml`, apply environment overrides and validate.
    ///
    /// A missing `main.toml` is not an error: the defaults plus environment
    /// are enough for a single-node deployment.
    pub async fn new(config_dir: &str) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(config_dir).await?;
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;

        if config.api_key.is_empty() {
            warn!(
                "No API key configured (set {}), every API call will be rejected",
                env::API_KEY
            );
        }

        info!(
            "Configuration loaded: node status {}, {} reference endpoints, {}s interval, {} watched services",
            config.node_status_url(),
            config.reference_endpoints.len(),
            config.monitoring_interval_seconds,
            config.services.len()
        );

        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_file(config_dir: &str) -> Result<Config, ConfigError> {
        let main_config_path = format!("{}/main.toml", config_dir);

        if !Path::new(&main_config_path).exists() {
            warn!(
                "No config file at {}, using defaults and environment",
                main_config_path
            );
            return Ok(Config::default());
        }

        debug!("Loading config: {}", main_config_path);
        let content =
            fs::read_to_string(&main_config_path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: main_config_path.clone(),
                    reason: e.to_string(),
                })?;

        parse_config(&content)
    }

    /// Overlay environment values on top of the file configuration.
    ///
    /// `RPC_ENDPOINT_1`/`RPC_ENDPOINT_2` replace the whole endpoint list when
    /// either is present, keeping primary-first order.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_empty(env::SERVER_PORT) {
            config.node_status_port =
                port.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: env::SERVER_PORT.to_string(),
                        reason: format!("'{}' is not a port number", port),
                    })?;
        }

        let env_endpoints: Vec<String> = [env::RPC_ENDPOINT_1, env::RPC_ENDPOINT_2]
            .iter()
            .filter_map(|key| non_empty(key))
            .map(|v| v.trim().to_string())
            .collect();
        if !env_endpoints.is_empty() {
            config.reference_endpoints = env_endpoints;
        }

        if let Some(interval) = non_empty(env::MONITORING_INTERVAL) {
            config.monitoring_interval_seconds =
                interval
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: env::MONITORING_INTERVAL.to_string(),
                        reason: format!("'{}' is not a number of seconds", interval),
                    })?;
        }

        for key in [env::STORY_SERVICE, env::STORY_GETH_SERVICE] {
            if let Some(unit) = non_empty(key) {
                let unit = unit.trim().to_string();
                if !config.services.contains(&unit) {
                    config.services.push(unit);
                }
            }
        }

        if let Some(url) = non_empty(env::NOTIFICATION_WEBHOOK_URL) {
            config.notification_webhook_url = url.trim().to_string();
        }

        if let Some(key) = non_empty(env::API_KEY) {
            config.api_key = key.trim().to_string();
        }

        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}
