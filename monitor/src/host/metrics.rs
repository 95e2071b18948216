//! `sysinfo` backed host metrics and network counters

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::Path;
use sysinfo::{Disks, Networks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::debug;

use super::{DiskIo, DiskUsage, MetricsProvider, NetworkInterface, NetworkStats, SystemMetrics};

#[derive(Debug, Clone, Default)]
pub struct SysinfoMetrics;

impl SysinfoMetrics {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsProvider for SysinfoMetrics {
    async fn disk_usage(&self, mount_point: &str) -> Result<DiskUsage> {
        let mount_point = mount_point.to_string();
        tokio::task::spawn_blocking(move || read_disk_usage(&mount_point)).await?
    }

    async fn system_metrics(&self, mount_point: &str) -> Result<SystemMetrics> {
        let mount_point = mount_point.to_string();
        tokio::task::spawn_blocking(move || {
            let mut system = System::new();

            // CPU usage is a delta between two refreshes
            system.refresh_cpu_usage();
            std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
            system.refresh_cpu_usage();
            system.refresh_cpu_frequency();
            system.refresh_memory();

            let cpus = system.cpus();
            let cpu_frequency_mhz = if cpus.is_empty() {
                0
            } else {
                cpus.iter().map(|cpu| cpu.frequency()).sum::<u64>() / cpus.len() as u64
            };

            let load = System::load_average();
            let disk = match read_disk_usage(&mount_point) {
                Ok(disk) => Some(disk),
                Err(e) => {
                    debug!("Disk usage unavailable: {}", e);
                    None
                }
            };

            Ok(SystemMetrics {
                cpu_percent: system.global_cpu_usage(),
                cpu_count: cpus.len(),
                cpu_frequency_mhz,
                load_average: [load.one, load.five, load.fifteen],
                memory_total_bytes: system.total_memory(),
                memory_used_bytes: system.used_memory(),
                memory_available_bytes: system.available_memory(),
                swap_total_bytes: system.total_swap(),
                swap_used_bytes: system.used_swap(),
                disk,
                disk_io: read_disk_io(),
            })
        })
        .await?
    }

    async fn network_stats(&self) -> Result<NetworkStats> {
        tokio::task::spawn_blocking(|| {
            let networks = Networks::new_with_refreshed_list();
            let mut stats = NetworkStats::default();

            for (name, data) in networks.list() {
                stats.bytes_received += data.total_received();
                stats.bytes_sent += data.total_transmitted();
                stats.packets_received += data.total_packets_received();
                stats.packets_sent += data.total_packets_transmitted();
                stats.errors_in += data.total_errors_on_received();
                stats.errors_out += data.total_errors_on_transmitted();
                stats.interfaces.push(NetworkInterface {
                    name: name.clone(),
                    addresses: data
                        .ip_networks()
                        .iter()
                        .map(|net| format!("{}/{}", net.addr, net.prefix))
                        .collect(),
                });
            }

            stats.interfaces.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(stats)
        })
        .await?
    }
}

fn read_disk_io() -> DiskIo {
    Disks::new_with_refreshed_list()
        .list()
        .iter()
        .map(|disk| disk.usage())
        .fold(DiskIo::default(), |acc, usage| DiskIo {
            read_bytes: acc.read_bytes + usage.total_read_bytes,
            written_bytes: acc.written_bytes + usage.total_written_bytes,
        })
}

/// Usage of the filesystem holding `mount_point` (longest mount prefix wins)
fn read_disk_usage(mount_point: &str) -> Result<DiskUsage> {
    let disks = Disks::new_with_refreshed_list();
    let target = Path::new(mount_point);

    let disk = disks
        .list()
        .iter()
        .filter(|d| target.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .ok_or_else(|| anyhow!("No mounted filesystem found for {}", mount_point))?;

    let total = disk.total_space();
    let free = disk.available_space();

    Ok(DiskUsage {
        mount_point: disk.mount_point().display().to_string(),
        total_bytes: total,
        used_bytes: total.saturating_sub(free),
        free_bytes: free,
    })
}
