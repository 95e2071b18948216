//! Client binary version lookup
//!
//! The consensus client prints aligned `Key   value` columns, the execution
//! client prints `Key: value` lines. Any field that cannot be read renders
//! as `Not available`.

use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::process::Command as AsyncCommand;
use tracing::debug;

use crate::constants::messages::NOT_AVAILABLE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusVersion {
    pub version: String,
    pub git_commit: String,
    pub git_timestamp: String,
}

impl ConsensusVersion {
    pub fn unavailable() -> Self {
        Self {
            version: NOT_AVAILABLE.to_string(),
            git_commit: NOT_AVAILABLE.to_string(),
            git_timestamp: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn parse(output: &str) -> Self {
        let mut parsed = Self::unavailable();

        for line in output.lines().map(str::trim) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if line.starts_with("Git Commit") {
                if let Some(commit) = fields.get(2) {
                    parsed.git_commit = commit.to_string();
                }
            } else if line.starts_with("Git Timestamp") {
                if fields.len() > 2 {
                    parsed.git_timestamp = fields[2..].join(" ");
                }
            } else if line.starts_with("Version") {
                if let Some(version) = fields.get(1) {
                    parsed.version = version.to_string();
                }
            }
        }

        parsed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionVersion {
    pub version: String,
    pub git_commit: String,
    pub git_commit_date: String,
    pub go_version: String,
    pub operating_system: String,
}

impl ExecutionVersion {
    pub fn unavailable() -> Self {
        Self {
            version: NOT_AVAILABLE.to_string(),
            git_commit: NOT_AVAILABLE.to_string(),
            git_commit_date: NOT_AVAILABLE.to_string(),
            go_version: NOT_AVAILABLE.to_string(),
            operating_system: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn parse(output: &str) -> Self {
        let mut parsed = Self::unavailable();

        for line in output.lines() {
            let Some((key, value)) = line.trim().split_once(": ") else {
                continue;
            };
            let value = value.trim().to_string();
            match key {
                "Version" => parsed.version = value,
                "Git Commit" => parsed.git_commit = value,
                "Git Commit Date" => parsed.git_commit_date = value,
                "Go Version" => parsed.go_version = value,
                "Operating System" => parsed.operating_system = value,
                _ => {}
            }
        }

        parsed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeVersions {
    pub consensus_binary: String,
    pub consensus: ConsensusVersion,
    pub execution_binary: String,
    pub execution: ExecutionVersion,
}

/// Run `<binary> version`, returning stdout followed by stderr
pub async fn read_binary_version(binary: &str) -> Result<String> {
    debug!("Reading version of {}", binary);

    let output = AsyncCommand::new(binary).arg("version").output().await?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "{} version exited with {}: {}",
            binary,
            output.status,
            error.trim()
        ));
    }

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text)
}
