// File: monitor/src/host/systemctl.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, info};

use super::{logs, versions, ServiceController, ServiceStatus};

/// `systemctl`/`journalctl` backed controller for the node's units
#[derive(Debug, Clone, Default)]
pub struct SystemdController;

impl SystemdController {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ServiceController for SystemdController {
    async fn status(&self, unit: &str) -> Result<ServiceStatus> {
        let state = get_service_status(unit).await?;
        Ok(ServiceStatus {
            unit: unit.to_string(),
            state,
        })
    }

    async fn restart(&self, unit: &str) -> Result<()> {
        restart_service(unit).await
    }

    async fn recent_logs(&self, unit: &str, lines: u32) -> Result<String> {
        logs::tail_journal(unit, lines).await
    }

    async fn binary_version(&self, binary: &str) -> Result<String> {
        versions::read_binary_version(binary).await
    }
}

pub async fn get_service_status(service_name: &str) -> Result<String> {
    debug!("Checking service status: {}", service_name);

    // is-active exits non-zero for inactive units; stdout still holds the state
    let output = AsyncCommand::new("systemctl")
        .arg("is-active")
        .arg(service_name)
        .output()
        .await?;

    let status = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if status.is_empty() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "No status reported for {}: {}",
            service_name,
            error.trim()
        ));
    }
    Ok(status)
}

pub async fn restart_service(service_name: &str) -> Result<()> {
    info!("Restarting service: {}", service_name);

    let output = AsyncCommand::new("sudo")
        .arg("systemctl")
        .arg("restart")
        .arg(service_name)
        .output()
        .await?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "Failed to restart service {}: {}",
            service_name,
            error.trim()
        ));
    }

    info!("Service {} restarted successfully", service_name);
    Ok(())
}
