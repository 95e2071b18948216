//! Host-side collaborators: systemd units, journal logs, client binaries
//! and system metrics
//!
//! The monitoring core only sees the traits below. The systemd and sysinfo
//! implementations are what the binary wires in; tests substitute fakes.

pub mod logs;
pub mod metrics;
pub mod systemctl;
pub mod versions;

pub use metrics::SysinfoMetrics;
pub use systemctl::SystemdController;
pub use versions::{ConsensusVersion, ExecutionVersion, NodeVersions};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub unit: String,
    /// `systemctl is-active` output, e.g. `active`, `failed`, `inactive`
    pub state: String,
}

impl ServiceStatus {
    pub fn is_active(&self) -> bool {
        self.state == "active"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskUsage {
    pub mount_point: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl DiskUsage {
    pub fn used_percent(&self) -> f64 {
        percent(self.used_bytes, self.total_bytes)
    }
}

/// Cumulative bytes moved by all block devices since boot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiskIo {
    pub read_bytes: u64,
    pub written_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetrics {
    pub cpu_percent: f32,
    pub cpu_count: usize,
    /// Average over all cores, 0 when the platform does not report it
    pub cpu_frequency_mhz: u64,
    pub load_average: [f64; 3],
    pub memory_total_bytes: u64,
    pub memory_used_bytes: u64,
    pub memory_available_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
    pub disk: Option<DiskUsage>,
    pub disk_io: DiskIo,
}

impl SystemMetrics {
    pub fn memory_used_percent(&self) -> f64 {
        percent(self.memory_used_bytes, self.memory_total_bytes)
    }

    pub fn swap_used_percent(&self) -> f64 {
        percent(self.swap_used_bytes, self.swap_total_bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInterface {
    pub name: String,
    /// Addresses in CIDR notation
    pub addresses: Vec<String>,
}

/// Totals since boot, summed over every interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub packets_received: u64,
    pub packets_sent: u64,
    pub errors_in: u64,
    pub errors_out: u64,
    pub interfaces: Vec<NetworkInterface>,
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

#[async_trait]
pub trait ServiceController: Send + Sync {
    async fn status(&self, unit: &str) -> Result<ServiceStatus>;

    async fn restart(&self, unit: &str) -> Result<()>;

    async fn recent_logs(&self, unit: &str, lines: u32) -> Result<String>;

    /// Raw output of `<binary> version`
    async fn binary_version(&self, binary: &str) -> Result<String>;
}

#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn disk_usage(&self, mount_point: &str) -> Result<DiskUsage>;

    async fn system_metrics(&self, mount_point: &str) -> Result<SystemMetrics>;

    async fn network_stats(&self) -> Result<NetworkStats>;
}
