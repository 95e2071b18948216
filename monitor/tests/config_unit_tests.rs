//! Unit tests for configuration parsing and validation
//!
//! These tests verify that configuration files are parsed correctly,
//! environment overrides are applied and validation rules are enforced.

mod common;

use common::fixtures::*;
use monitor::config::manager::{env, parse_config};
use monitor::config::{Config, ConfigManager};
use monitor::errors::ConfigError;
use rstest::rstest;
use serial_test::serial;
use std::collections::HashMap;

const ENV_KEYS: [&str; 8] = [
    env::SERVER_PORT,
    env::RPC_ENDPOINT_1,
    env::RPC_ENDPOINT_2,
    env::MONITORING_INTERVAL,
    env::STORY_SERVICE,
    env::STORY_GETH_SERVICE,
    env::NOTIFICATION_WEBHOOK_URL,
    env::API_KEY,
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_parse_main_config() {
    let main_toml = r#"
host = "0.0.0.0"
port = 9000
node_status_host = "10.0.0.5"
node_status_port = 36657
reference_endpoints = ["https://rpc-a.example.com/status", "https://rpc-b.example.com/status"]
monitoring_interval_seconds = 120
notification_webhook_url = "https://bridge.example.com/webhook"
services = ["story", "story-geth"]
    "#;

    let config = parse_config(main_toml).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9000);
    assert_eq!(config.node_status_url(), "http://10.0.0.5:36657/status");
    assert_eq!(config.reference_endpoints.len(), 2);
    assert_eq!(config.monitoring_interval_seconds, 120);
    assert_eq!(config.services, vec!["story", "story-geth"]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_defaults_fill_missing_fields() {
    let config = parse_config(r#"reference_endpoints = ["http://a/status"]"#).unwrap();

    assert_eq!(config.monitoring_interval_seconds, 300);
    assert_eq!(config.initial_delay_seconds, 10);
    assert_eq!(config.message_limit, 4096);
    assert_eq!(config.chunk_budget, 4000);
    assert_eq!(config.node_status_url(), "http://localhost:26657/status");
    assert!(config.notification_webhook_url.is_empty());
    assert!(config.api_key.is_empty());
    assert_eq!(config.node_binary, "story");
    assert_eq!(config.execution_binary, "story-geth");
}

#[test]
fn test_env_api_key_overrides_file() {
    let mut config = parse_config(
        r#"
reference_endpoints = ["http://file/status"]
api_key = "from-file"
"#,
    )
    .unwrap();
    ConfigManager::apply_env_overrides(&mut config, lookup(&[(env::API_KEY, " from-env ")]))
        .unwrap();
    assert_eq!(config.api_key, "from-env");
}

#[test]
fn test_invalid_toml() {
    let err = parse_config("port = \"not a number\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_missing_endpoints_rejected() {
    let err = Config::default().validate().unwrap_err();
    assert!(matches!(err, ConfigError::MissingRequired { .. }));
}

#[rstest]
#[case("monitoring_interval_seconds = 0")]
#[case("rpc_timeout_seconds = 0")]
#[case("chunk_budget = 0")]
#[case("chunk_budget = 5000")]
fn test_invalid_values_rejected(#[case] line: &str) {
    let toml = format!("reference_endpoints = [\"http://a/status\"]\n{}", line);
    let config = parse_config(&toml).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_non_http_endpoint_rejected() {
    let config = parse_config(r#"reference_endpoints = ["tcp://a:26657"]"#).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_env_endpoints_replace_file_list() {
    let mut config = parse_config(r#"reference_endpoints = ["http://file/status"]"#).unwrap();
    ConfigManager::apply_env_overrides(
        &mut config,
        lookup(&[
            (env::RPC_ENDPOINT_1, "https://primary/status"),
            (env::RPC_ENDPOINT_2, "https://secondary/status"),
        ]),
    )
    .unwrap();

    assert_eq!(
        config.reference_endpoints,
        vec!["https://primary/status", "https://secondary/status"]
    );
}

#[test]
fn test_env_services_appended_once() {
    let mut config = parse_config(r#"services = ["story"]"#).unwrap();
    ConfigManager::apply_env_overrides(
        &mut config,
        lookup(&[
            (env::STORY_SERVICE, "story"),
            (env::STORY_GETH_SERVICE, "story-geth"),
        ]),
    )
    .unwrap();

    assert_eq!(config.services, vec!["story", "story-geth"]);
}

#[test]
fn test_env_bad_interval() {
    let mut config = Config::default();
    let err = ConfigManager::apply_env_overrides(
        &mut config,
        lookup(&[(env::MONITORING_INTERVAL, "five")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_blank_env_values_ignored() {
    let mut config = parse_config(r#"reference_endpoints = ["http://file/status"]"#).unwrap();
    ConfigManager::apply_env_overrides(&mut config, lookup(&[(env::RPC_ENDPOINT_1, "  ")]))
        .unwrap();
    assert_eq!(config.reference_endpoints, vec!["http://file/status"]);
}

#[tokio::test]
#[serial]
async fn test_manager_loads_file() {
    clear_env();
    let test_config = TestConfigBuilder::new()
        .reference_endpoints(&["http://a/status", "http://b/status"])
        .line("monitoring_interval_seconds = 60")
        .build();

    let manager = ConfigManager::new(test_config.dir()).await.unwrap();
    let config = manager.get_current_config();

    assert_eq!(config.reference_endpoints.len(), 2);
    assert_eq!(config.monitoring_interval_seconds, 60);
}

#[tokio::test]
#[serial]
async fn test_manager_without_file_uses_environment() {
    clear_env();
    std::env::set_var(env::RPC_ENDPOINT_1, "https://env-primary/status");
    std::env::set_var(env::MONITORING_INTERVAL, "30");
    std::env::set_var(env::SERVER_PORT, "36657");

    let test_config = TestConfigBuilder::new().build();
    let result = ConfigManager::new(test_config.dir()).await;
    clear_env();

    let config = result.unwrap().get_current_config();
    assert_eq!(config.reference_endpoints, vec!["https://env-primary/status"]);
    assert_eq!(config.monitoring_interval_seconds, 30);
    assert_eq!(config.node_status_port, 36657);
}

#[tokio::test]
#[serial]
async fn test_manager_rejects_config_without_endpoints() {
    clear_env();
    let test_config = TestConfigBuilder::new().line("port = 8100").build();

    let err = ConfigManager::new(test_config.dir()).await.unwrap_err();
    assert!(matches!(err, ConfigError::MissingRequired { .. }));
}
