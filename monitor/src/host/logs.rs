// File: monitor/src/host/logs.rs
use anyhow::{anyhow, Result};
use tokio::process::Command as AsyncCommand;
use tracing::info;

pub async fn tail_journal(service_name: &str, lines: u32) -> Result<String> {
    info!("Fetching last {} journal lines for {}", lines, service_name);

    let output = AsyncCommand::new("journalctl")
        .arg("-u")
        .arg(service_name)
        .arg("-n")
        .arg(lines.to_string())
        .arg("--no-pager")
        .output()
        .await?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "Failed to read journal for {}: {}",
            service_name,
            error.trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
