//! Structured report assembly
//!
//! Reports are built as a list of typed sections and rendered in one pass.
//! Size limits are applied afterwards by [`AlertFormatter`], so layout and
//! chunking stay independent.

use std::fmt::Write;

use super::message::{AlertMessage, MessageControl};
use crate::constants::BYTES_PER_GIB;
use crate::health::{NodeSnapshot, SyncVerdict};
use crate::host::{DiskUsage, NetworkStats, NodeVersions, ServiceStatus, SystemMetrics};

#[derive(Debug, Clone, PartialEq)]
pub enum ReportSection {
    Services(Vec<ServiceStatus>),
    Disk(DiskUsage),
    NodeIdentity(NodeSnapshot),
    SyncStatus(NodeSnapshot),
    Validator(NodeSnapshot),
    SyncSummary(SyncVerdict),
    SyncError(String),
    Versions(NodeVersions),
    Performance(SystemMetrics),
    Network(NetworkStats),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthReport {
    title: Option<String>,
    sections: Vec<ReportSection>,
}

impl HealthReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            sections: Vec::new(),
        }
    }

    pub fn services(mut self, statuses: Vec<ServiceStatus>) -> Self {
        if !statuses.is_empty() {
            self.sections.push(ReportSection::Services(statuses));
        }
        self
    }

    pub fn disk(mut self, usage: Option<DiskUsage>) -> Self {
        if let Some(usage) = usage {
            self.sections.push(ReportSection::Disk(usage));
        }
        self
    }

    /// Identity, sync and validator blocks, in that order
    pub fn node(mut self, snapshot: &NodeSnapshot) -> Self {
        self.sections
            .push(ReportSection::NodeIdentity(snapshot.clone()));
        self.sections.push(ReportSection::SyncStatus(snapshot.clone()));
        self.sections.push(ReportSection::Validator(snapshot.clone()));
        self
    }

    pub fn sync_summary(mut self, verdict: SyncVerdict) -> Self {
        self.sections.push(ReportSection::SyncSummary(verdict));
        self
    }

    pub fn sync_error(mut self, error: impl Into<String>) -> Self {
        self.sections.push(ReportSection::SyncError(error.into()));
        self
    }

    pub fn versions(mut self, versions: NodeVersions) -> Self {
        self.sections.push(ReportSection::Versions(versions));
        self
    }

    pub fn performance(mut self, metrics: SystemMetrics) -> Self {
        self.sections.push(ReportSection::Performance(metrics));
        self
    }

    pub fn network(mut self, stats: NetworkStats) -> Self {
        self.sections.push(ReportSection::Network(stats));
        self
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(title) = &self.title {
            let _ = write!(out, "{}\n\n", title);
        }

        for section in &self.sections {
            render_section(&mut out, section);
        }

        out.truncate(out.trim_end().len());
        out
    }
}

// Writes into a String never fail
fn render_section(out: &mut String, section: &ReportSection) {
    match section {
        ReportSection::Services(statuses) => {
            let _ = writeln!(out, "**System Services:**");
            for status in statuses {
                let _ = writeln!(out, "• `{}`: `{}`", status.unit, status.state);
            }
            out.push('\n');
        }
        ReportSection::Disk(disk) => {
            let _ = writeln!(out, "🔍 **Disk Monitoring ({}):**", disk.mount_point);
            let _ = writeln!(out, "• **Total:** {:.2} GB", gib(disk.total_bytes));
            let _ = writeln!(
                out,
                "• **Used:** {:.2} GB ({:.1}%)",
                gib(disk.used_bytes),
                disk.used_percent()
            );
            let _ = writeln!(out, "• **Free:** {:.2} GB", gib(disk.free_bytes));
            out.push('\n');
        }
        ReportSection::NodeIdentity(node) => {
            let _ = writeln!(out, "**Node Status:**");
            let _ = writeln!(out, "• Node ID: `{}`", node.node_id);
            let _ = writeln!(out, "• Moniker: `{}`", node.moniker);
            let _ = writeln!(out, "• Listen Address: `{}`", node.listen_addr);
            let _ = writeln!(out, "• Network: `{}`", node.network);
            let _ = writeln!(out, "• Version: `{}`", node.version);
            out.push('\n');
        }
        ReportSection::SyncStatus(node) => {
            let _ = writeln!(out, "**Synchronization Info:**");
            let _ = writeln!(out, "• Latest Block Height: `{}`", node.latest_block_height);
            let _ = writeln!(out, "• Latest Block Time: `{}`", node.latest_block_time);
            let _ = writeln!(out, "• Catching Up: `{}`", node.catching_up);
            out.push('\n');
        }
        ReportSection::Validator(node) => {
            let _ = writeln!(out, "**Validator Info:**");
            let _ = writeln!(out, "• Address: `{}`", node.validator_address);
            let _ = writeln!(out, "• Voting Power: `{}`", node.voting_power);
            let _ = writeln!(out, "• Proposer Priority: `{}`", node.proposer_priority);
            out.push('\n');
        }
        ReportSection::SyncSummary(verdict) => {
            out.push_str(&sync_summary(verdict));
            out.push_str("\n\n");
        }
        ReportSection::SyncError(error) => {
            let _ = write!(out, "❌ **Block Synchronization Error:** {}\n\n", error);
        }
        ReportSection::Versions(versions) => {
            let consensus = &versions.consensus;
            let _ = writeln!(out, "**Node Version (`{}`):**", versions.consensus_binary);
            let _ = writeln!(out, "• Version: `{}`", consensus.version);
            let _ = writeln!(out, "• Git Commit: `{}`", consensus.git_commit);
            let _ = writeln!(out, "• Git Timestamp: `{}`", consensus.git_timestamp);
            out.push('\n');

            let execution = &versions.execution;
            let _ = writeln!(
                out,
                "**Execution Client Version (`{}`):**",
                versions.execution_binary
            );
            let _ = writeln!(out, "• Version: `{}`", execution.version);
            let _ = writeln!(out, "• Git Commit: `{}`", execution.git_commit);
            let _ = writeln!(out, "• Git Date: `{}`", execution.git_commit_date);
            let _ = writeln!(out, "• Go Version: `{}`", execution.go_version);
            let _ = writeln!(out, "• Operating System: `{}`", execution.operating_system);
            out.push('\n');
        }
        ReportSection::Performance(metrics) => render_performance(out, metrics),
        ReportSection::Network(stats) => render_network(out, stats),
    }
}

fn render_performance(out: &mut String, metrics: &SystemMetrics) {
    let _ = writeln!(out, "**CPU:**");
    let _ = writeln!(out, "• Usage: {:.1}% of {} cores", metrics.cpu_percent, metrics.cpu_count);
    if metrics.cpu_frequency_mhz > 0 {
        let _ = writeln!(out, "• Frequency: {} MHz", metrics.cpu_frequency_mhz);
    }
    let [one, five, fifteen] = metrics.load_average;
    let _ = writeln!(out, "• Load Average: {:.2}, {:.2}, {:.2}", one, five, fifteen);
    out.push('\n');

    let _ = writeln!(out, "**Memory:**");
    let _ = writeln!(out, "• Total: {:.2} GB", gib(metrics.memory_total_bytes));
    let _ = writeln!(
        out,
        "• Used: {:.2} GB ({:.1}%)",
        gib(metrics.memory_used_bytes),
        metrics.memory_used_percent()
    );
    let _ = writeln!(out, "• Available: {:.2} GB", gib(metrics.memory_available_bytes));
    out.push('\n');

    let _ = writeln!(out, "**Swap:**");
    if metrics.swap_total_bytes == 0 {
        let _ = writeln!(out, "• Not configured");
    } else {
        let _ = writeln!(out, "• Total: {:.2} GB", gib(metrics.swap_total_bytes));
        let _ = writeln!(
            out,
            "• Used: {:.2} GB ({:.1}%)",
            gib(metrics.swap_used_bytes),
            metrics.swap_used_percent()
        );
    }
    out.push('\n');

    if let Some(disk) = &metrics.disk {
        render_section(out, &ReportSection::Disk(disk.clone()));
    }

    let _ = writeln!(out, "**Disk I/O:**");
    let _ = writeln!(out, "• Read: {:.2} GB", gib(metrics.disk_io.read_bytes));
    let _ = writeln!(out, "• Written: {:.2} GB", gib(metrics.disk_io.written_bytes));
    out.push('\n');
}

fn render_network(out: &mut String, stats: &NetworkStats) {
    let _ = writeln!(out, "**Network I/O:**");
    let _ = writeln!(out, "• Received: {:.2} GB", gib(stats.bytes_received));
    let _ = writeln!(out, "• Sent: {:.2} GB", gib(stats.bytes_sent));
    let _ = writeln!(out, "• Packets Received: {}", stats.packets_received);
    let _ = writeln!(out, "• Packets Sent: {}", stats.packets_sent);
    let _ = writeln!(out, "• Errors In: {}", stats.errors_in);
    let _ = writeln!(out, "• Errors Out: {}", stats.errors_out);
    out.push('\n');

    let _ = writeln!(out, "**Network Interfaces:**");
    for interface in &stats.interfaces {
        if interface.addresses.is_empty() {
            let _ = writeln!(out, "• `{}`: no address", interface.name);
        } else {
            let addresses = interface.addresses.join("`, `");
            let _ = writeln!(out, "• `{}`: `{}`", interface.name, addresses);
        }
    }
    out.push('\n');
}

/// Free-form synchronization wording for a verdict
pub fn sync_summary(verdict: &SyncVerdict) -> String {
    if verdict.synced {
        format!(
            "✅ **Block Synchronization Status:**\n\n\
             Your node is fully synchronized.\n\
             Node Block Height: {}\n\
             Network Latest Block: {}",
            verdict.local_height, verdict.reference_height
        )
    } else {
        format!(
            "🚨 **Block Synchronization Alert:**\n\n\
             Your node is behind by {} blocks.\n\
             Node Block Height: {}\n\
             Network Latest Block: {}\n\n\
             🔍 Please check your node to ensure it's operating correctly.",
            verdict.deficit, verdict.local_height, verdict.reference_height
        )
    }
}

fn gib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GIB
}

/// Turns reports into transport-sized [`AlertMessage`]s
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    message_limit: usize,
    chunk_budget: usize,
}

impl AlertFormatter {
    pub fn new(message_limit: usize, chunk_budget: usize) -> Self {
        Self {
            message_limit,
            chunk_budget,
        }
    }

    /// Node blocks followed by the sync summary
    pub fn format(&self, snapshot: &NodeSnapshot, verdict: &SyncVerdict) -> AlertMessage {
        let report = HealthReport::new().node(snapshot).sync_summary(*verdict);
        self.format_report(&report)
    }

    pub fn format_report(&self, report: &HealthReport) -> AlertMessage {
        AlertMessage::new(
            &report.render(),
            self.message_limit,
            self.chunk_budget,
            Some(MessageControl::main_menu()),
        )
    }

    /// Single short notice for a failed tick
    pub fn format_error(&self, error: &str) -> AlertMessage {
        AlertMessage::new(
            &format!("❌ Error in monitoring update: {}", error),
            self.message_limit,
            self.chunk_budget,
            None,
        )
    }
}
