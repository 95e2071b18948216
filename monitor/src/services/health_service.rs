// File: monitor/src/services/health_service.rs
use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::alerts::{AlertFormatter, AlertMessage, HealthReport};
use crate::config::Config;
use crate::errors::HealthError;
use crate::health::{
    create_rpc_client, evaluate, NodeSnapshot, NodeStatusClient, ReferenceHeight,
    ReferenceHeightResolver, SyncVerdict,
};
use crate::host::{
    ConsensusVersion, DiskUsage, ExecutionVersion, MetricsProvider, NodeVersions,
    ServiceController, ServiceStatus,
};
use crate::scheduler::TickPipeline;

/// One full comparison of the local node against the network
#[derive(Debug, Clone, Serialize)]
pub struct SyncCheck {
    pub snapshot: NodeSnapshot,
    pub reference: ReferenceHeight,
    pub verdict: SyncVerdict,
}

/// Fetch → evaluate → format pipeline shared by scheduled ticks and
/// on-demand status requests.
pub struct HealthService {
    config: Arc<Config>,
    node_client: NodeStatusClient,
    resolver: ReferenceHeightResolver,
    formatter: AlertFormatter,
    services: Arc<dyn ServiceController>,
    metrics: Arc<dyn MetricsProvider>,
}

impl HealthService {
    pub fn new(
        config: Arc<Config>,
        services: Arc<dyn ServiceController>,
        metrics: Arc<dyn MetricsProvider>,
    ) -> Result<Self> {
        let client = create_rpc_client(config.rpc_timeout())?;
        let node_client = NodeStatusClient::new(client.clone(), config.node_status_url());
        let resolver = ReferenceHeightResolver::new(client, config.reference_endpoints.clone());

        Ok(Self::with_clients(
            config,
            node_client,
            resolver,
            services,
            metrics,
        ))
    }

    pub fn with_clients(
        config: Arc<Config>,
        node_client: NodeStatusClient,
        resolver: ReferenceHeightResolver,
        services: Arc<dyn ServiceController>,
        metrics: Arc<dyn MetricsProvider>,
    ) -> Self {
        let formatter = AlertFormatter::new(config.message_limit, config.chunk_budget);
        Self {
            config,
            node_client,
            resolver,
            formatter,
            services,
            metrics,
        }
    }

    /// Local snapshot and reference height fetched in parallel, then compared
    pub async fn sync_check(&self) -> Result<SyncCheck, HealthError> {
        let (snapshot, reference) =
            tokio::join!(self.node_client.fetch_snapshot(), self.resolver.resolve());
        let snapshot = snapshot?;
        let reference = reference?;

        let verdict = evaluate(&snapshot, &reference)?;
        info!(
            "Node height {} vs network {} (source #{}): deficit {}",
            verdict.local_height,
            verdict.reference_height,
            reference.source_index + 1,
            verdict.deficit
        );

        Ok(SyncCheck {
            snapshot,
            reference,
            verdict,
        })
    }

    /// Scheduled report. Any pipeline failure is returned to the caller,
    /// which turns it into a short error notice.
    pub async fn monitoring_update(&self) -> Result<AlertMessage, HealthError> {
        let (check, statuses, disk) = tokio::join!(
            self.sync_check(),
            self.service_statuses(),
            self.disk_usage()
        );
        let check = check?;

        let report = HealthReport::titled("🔍 **Monitoring Update:**")
            .services(statuses)
            .disk(disk)
            .node(&check.snapshot)
            .sync_summary(check.verdict);

        Ok(self.formatter.format_report(&report))
    }

    /// On-demand report. Never fails: an unreachable node renders as
    /// `Not available` fields and sync problems become an error block.
    pub async fn status_report(&self) -> AlertMessage {
        let (snapshot, reference, statuses) = tokio::join!(
            self.node_client.fetch_snapshot(),
            self.resolver.resolve(),
            self.service_statuses()
        );

        let mut report = HealthReport::titled("📊 **Node Status:**").services(statuses);

        report = match &snapshot {
            Ok(snapshot) => report.node(snapshot),
            Err(e) => {
                warn!("Status report without node data: {}", e);
                report.node(&NodeSnapshot::unavailable())
            }
        };

        let verdict = snapshot.and_then(|snapshot| {
            let reference = reference?;
            evaluate(&snapshot, &reference)
        });

        report = match verdict {
            Ok(verdict) => report.sync_summary(verdict),
            Err(e) => report.sync_error(e.to_string()),
        };

        self.formatter.format_report(&report)
    }

    /// Client versions plus node identity, sync and validator blocks.
    /// Lenient like [`Self::status_report`].
    pub async fn validator_report(&self) -> AlertMessage {
        let (snapshot, versions) =
            tokio::join!(self.node_client.fetch_snapshot(), self.node_versions());

        let snapshot = snapshot.unwrap_or_else(|e| {
            warn!("Validator report without node data: {}", e);
            NodeSnapshot::unavailable()
        });

        let report = HealthReport::titled("✅ **Detailed Validator Information:**")
            .versions(versions)
            .node(&snapshot);

        self.formatter.format_report(&report)
    }

    pub async fn node_versions(&self) -> NodeVersions {
        let consensus_binary = &self.config.node_binary;
        let execution_binary = &self.config.execution_binary;

        let (consensus, execution) = tokio::join!(
            self.services.binary_version(consensus_binary),
            self.services.binary_version(execution_binary)
        );

        let consensus = match consensus {
            Ok(output) => ConsensusVersion::parse(&output),
            Err(e) => {
                warn!("Failed to read {} version: {}", consensus_binary, e);
                ConsensusVersion::unavailable()
            }
        };
        let execution = match execution {
            Ok(output) => ExecutionVersion::parse(&output),
            Err(e) => {
                warn!("Failed to read {} version: {}", execution_binary, e);
                ExecutionVersion::unavailable()
            }
        };

        NodeVersions {
            consensus_binary: consensus_binary.clone(),
            consensus,
            execution_binary: execution_binary.clone(),
            execution,
        }
    }

    pub async fn service_statuses(&self) -> Vec<ServiceStatus> {
        let lookups = self
            .config
            .services
            .iter()
            .map(|unit| async move {
                match self.services.status(unit).await {
                    Ok(status) => status,
                    Err(e) => {
                        warn!("Failed to read status of {}: {}", unit, e);
                        ServiceStatus {
                            unit: unit.clone(),
                            state: "unknown".to_string(),
                        }
                    }
                }
            });

        join_all(lookups).await
    }

    async fn disk_usage(&self) -> Option<DiskUsage> {
        match self.metrics.disk_usage(&self.config.disk_mount_point).await {
            Ok(usage) => Some(usage),
            Err(e) => {
                warn!("Disk usage unavailable for report: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl TickPipeline for HealthService {
    async fn run_tick(&self) -> Result<AlertMessage, HealthError> {
        self.monitoring_update().await
    }

    fn format_error(&self, error: &HealthError) -> AlertMessage {
        self.formatter.format_error(&error.to_string())
    }
}
