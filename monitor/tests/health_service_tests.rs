//! End-to-end tests of the fetch, evaluate and format pipeline
//!
//! A mocked local node and mocked reference endpoints stand in for the
//! network; systemd and sysinfo are replaced by fakes.

mod common;

use common::fixtures::*;
use monitor::errors::HealthError;
use monitor::scheduler::TickPipeline;
use monitor::services::HealthService;
use std::sync::Arc;
use test_case::test_case;

struct Harness {
    node: MockRpcServer,
    primary: MockRpcServer,
    secondary: MockRpcServer,
}

impl Harness {
    async fn start() -> Self {
        Self {
            node: MockRpcServer::start().await,
            primary: MockRpcServer::start().await,
            secondary: MockRpcServer::start().await,
        }
    }

    fn service(&self) -> HealthService {
        let config = test_config(
            self.node.port(),
            vec![self.primary.status_url(), self.secondary.status_url()],
        );
        HealthService::new(
            Arc::new(config),
            Arc::new(FakeServiceController::with_states(&[
                ("story", "active"),
                ("story-geth", "failed"),
            ])),
            Arc::new(FakeMetrics),
        )
        .expect("health service")
    }
}

#[test_case(100, 100, true, 0 ; "equal heights are synced")]
#[test_case(95, 130, false, 35 ; "lagging node")]
#[test_case(140, 130, true, 0 ; "node ahead of reference")]
#[tokio::test]
async fn test_sync_check(local: u64, network: u64, synced: bool, deficit: u64) {
    let h = Harness::start().await;
    h.node.mock_height(local).await;
    h.primary.mock_height(network).await;

    let check = h.service().sync_check().await.unwrap();

    assert_eq!(check.verdict.synced, synced);
    assert_eq!(check.verdict.deficit, deficit);
    assert_eq!(check.verdict.local_height, local);
    assert_eq!(check.verdict.reference_height, network);
}

#[tokio::test]
async fn test_monitoring_update_synced() {
    let h = Harness::start().await;
    h.node.mock_height(100).await;
    h.primary.mock_height(100).await;

    let message = h.service().monitoring_update().await.unwrap();
    let text = message.text();

    assert!(text.starts_with("🔍 **Monitoring Update:**"));
    assert!(text.contains("• `story`: `active`"));
    assert!(text.contains("• `story-geth`: `failed`"));
    assert!(text.contains("**Disk Monitoring (/):**"));
    assert!(text.contains("• Moniker: `test-validator`"));
    assert!(text.contains("Your node is fully synchronized."));
    assert!(text.contains("Node Block Height: 100"));
    assert!(text.contains("Network Latest Block: 100"));
    assert!(message.control().is_some());
}

#[tokio::test]
async fn test_monitoring_update_lagging() {
    let h = Harness::start().await;
    h.node.mock_height(95).await;
    h.primary.mock_height(130).await;

    let text = h.service().monitoring_update().await.unwrap().text();

    assert!(text.contains("🚨 **Block Synchronization Alert:**"));
    assert!(text.contains("Your node is behind by 35 blocks."));
    assert!(text.contains("Node Block Height: 95"));
    assert!(text.contains("Network Latest Block: 130"));
}

#[tokio::test]
async fn test_monitoring_update_uses_secondary_on_primary_failure() {
    let h = Harness::start().await;
    h.node.mock_height(120).await;
    h.primary.mock_unhealthy().await;
    h.secondary.mock_height(130).await;

    let check = h.service().sync_check().await.unwrap();
    assert_eq!(check.reference.source_index, 1);
    assert_eq!(check.verdict.deficit, 10);
}

#[tokio::test]
async fn test_tick_fails_when_all_references_fail() {
    let h = Harness::start().await;
    h.node.mock_height(100).await;
    h.primary.mock_unhealthy().await;
    h.secondary.mock_unhealthy().await;

    let service = h.service();
    let err = service.run_tick().await.unwrap_err();
    assert!(matches!(err, HealthError::AllEndpointsUnavailable { .. }));

    let notice = service.format_error(&err);
    assert_eq!(notice.len(), 1);
    assert!(notice.text().starts_with("❌ Error in monitoring update:"));
    assert!(notice.control().is_none());
}

#[tokio::test]
async fn test_tick_fails_on_unparseable_local_height() {
    let h = Harness::start().await;
    h.node
        .mock_body(serde_json::json!({"result": {"sync_info": {}}}))
        .await;
    h.primary.mock_height(100).await;

    let err = h.service().monitoring_update().await.unwrap_err();
    assert!(matches!(err, HealthError::InvalidHeight { .. }));
}

#[tokio::test]
async fn test_status_report_survives_unreachable_node() {
    let h = Harness::start().await;
    h.node.mock_unhealthy().await;
    h.primary.mock_height(100).await;

    let text = h.service().status_report().await.text();

    assert!(text.starts_with("📊 **Node Status:**"));
    assert!(text.contains("• Moniker: `Not available`"));
    assert!(text.contains("❌ **Block Synchronization Error:**"));
}

#[tokio::test]
async fn test_status_report_full() {
    let h = Harness::start().await;
    h.node.mock_height(95).await;
    h.primary.mock_height(130).await;

    let text = h.service().status_report().await.text();

    assert!(text.contains("**Validator Info:**"));
    assert!(text.contains("• Voting Power: `1000`"));
    assert!(text.contains("Your node is behind by 35 blocks."));
}

#[tokio::test]
async fn test_unknown_unit_state() {
    let h = Harness::start().await;
    let config = test_config(h.node.port(), vec![h.primary.status_url()]);
    let service = HealthService::new(
        Arc::new(config),
        Arc::new(FakeServiceController::with_states(&[("story", "active")])),
        Arc::new(FakeMetrics),
    )
    .unwrap();

    let statuses = service.service_statuses().await;
    assert_eq!(statuses.len(), 2);
    assert!(statuses[0].is_active());
    assert_eq!(statuses[1].unit, "story-geth");
    assert_eq!(statuses[1].state, "unknown");
}
