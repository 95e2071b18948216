//! In-memory stand-ins for systemd, sysinfo and the chat transport

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use monitor::alerts::AlertMessage;
use monitor::errors::NotifyError;
use monitor::host::{
    DiskIo, DiskUsage, MetricsProvider, NetworkInterface, NetworkStats, ServiceController,
    ServiceStatus, SystemMetrics,
};
use monitor::services::NotificationSink;

const GIB: u64 = 1024 * 1024 * 1024;

/// Service controller with fixed unit states and version outputs that
/// records restarts
#[derive(Default)]
pub struct FakeServiceController {
    states: HashMap<String, String>,
    versions: HashMap<String, String>,
    pub restarted: Mutex<Vec<String>>,
}

impl FakeServiceController {
    pub fn with_states(states: &[(&str, &str)]) -> Self {
        Self {
            states: states
                .iter()
                .map(|(unit, state)| (unit.to_string(), state.to_string()))
                .collect(),
            versions: HashMap::new(),
            restarted: Mutex::new(Vec::new()),
        }
    }

    /// Output returned by `<binary> version`; unknown binaries fail
    pub fn with_version(mut self, binary: &str, output: &str) -> Self {
        self.versions.insert(binary.to_string(), output.to_string());
        self
    }
}

#[async_trait]
impl ServiceController for FakeServiceController {
    async fn status(&self, unit: &str) -> Result<ServiceStatus> {
        self.states
            .get(unit)
            .map(|state| ServiceStatus {
                unit: unit.to_string(),
                state: state.clone(),
            })
            .ok_or_else(|| anyhow!("unit {} not found", unit))
    }

    async fn restart(&self, unit: &str) -> Result<()> {
        self.restarted.lock().await.push(unit.to_string());
        Ok(())
    }

    async fn recent_logs(&self, unit: &str, lines: u32) -> Result<String> {
        Ok((1..=lines)
            .map(|n| format!("{} log line {}", unit, n))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn binary_version(&self, binary: &str) -> Result<String> {
        self.versions
            .get(binary)
            .cloned()
            .ok_or_else(|| anyhow!("{}: command not found", binary))
    }
}

/// Metrics provider reporting a 100 GiB disk that is 40% used
#[derive(Default)]
pub struct FakeMetrics;

impl FakeMetrics {
    fn disk(mount_point: &str) -> DiskUsage {
        DiskUsage {
            mount_point: mount_point.to_string(),
            total_bytes: 100 * GIB,
            used_bytes: 40 * GIB,
            free_bytes: 60 * GIB,
        }
    }
}

#[async_trait]
impl MetricsProvider for FakeMetrics {
    async fn disk_usage(&self, mount_point: &str) -> Result<DiskUsage> {
        Ok(Self::disk(mount_point))
    }

    async fn system_metrics(&self, mount_point: &str) -> Result<SystemMetrics> {
        Ok(SystemMetrics {
            cpu_percent: 12.5,
            cpu_count: 8,
            cpu_frequency_mhz: 3200,
            load_average: [0.5, 0.4, 0.3],
            memory_total_bytes: 16 * GIB,
            memory_used_bytes: 4 * GIB,
            memory_available_bytes: 12 * GIB,
            swap_total_bytes: 2 * GIB,
            swap_used_bytes: 0,
            disk: Some(Self::disk(mount_point)),
            disk_io: DiskIo {
                read_bytes: 5 * GIB,
                written_bytes: 3 * GIB,
            },
        })
    }

    async fn network_stats(&self) -> Result<NetworkStats> {
        Ok(NetworkStats {
            bytes_received: 10 * GIB,
            bytes_sent: 2 * GIB,
            packets_received: 1_000,
            packets_sent: 800,
            errors_in: 0,
            errors_out: 1,
            interfaces: vec![NetworkInterface {
                name: "eth0".to_string(),
                addresses: vec!["10.0.0.5/24".to_string()],
            }],
        })
    }
}

/// Sink that keeps every delivered message per session
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<(String, AlertMessage)>>,
}

impl RecordingSink {
    pub async fn messages_for(&self, session_id: &str) -> Vec<AlertMessage> {
        self.delivered
            .lock()
            .await
            .iter()
            .filter(|(id, _)| id == session_id)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub async fn total(&self) -> usize {
        self.delivered.lock().await.len()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, session_id: &str, message: &AlertMessage) -> Result<(), NotifyError> {
        self.delivered
            .lock()
            .await
            .push((session_id.to_string(), message.clone()));
        Ok(())
    }
}
