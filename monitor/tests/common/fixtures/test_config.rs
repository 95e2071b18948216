//! Test configuration builders

use monitor::config::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Bearer token accepted by routers built from [`test_config`]
pub const TEST_API_KEY: &str = "test-api-key";

/// In-memory config pointing at mock servers
pub fn test_config(node_status_port: u16, reference_endpoints: Vec<String>) -> Config {
    Config {
        node_status_host: "127.0.0.1".to_string(),
        node_status_port,
        reference_endpoints,
        rpc_timeout_seconds: 2,
        services: vec!["story".to_string(), "story-geth".to_string()],
        api_key: TEST_API_KEY.to_string(),
        ..Config::default()
    }
}

/// Builder that writes a `main.toml` into a temporary config directory
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    lines: Vec<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            lines: Vec::new(),
        }
    }

    /// Append one raw TOML line
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn reference_endpoints(self, endpoints: &[&str]) -> Self {
        let quoted: Vec<String> = endpoints.iter().map(|e| format!("\"{}\"", e)).collect();
        let line = format!("reference_endpoints = [{}]", quoted.join(", "));
        self.line(&line)
    }

    /// Write main.toml, or only the empty directory when no lines were added
    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        if !self.lines.is_empty() {
            fs::write(config_dir.join("main.toml"), self.lines.join("\n"))
                .expect("Failed to write main.toml");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Config directory that lives as long as this value
pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestConfig {
    pub fn dir(&self) -> &str {
        self.config_dir.to_str().expect("temp path is not UTF-8")
    }
}
