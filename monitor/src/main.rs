// File: monitor/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use monitor::config::ConfigManager;
use monitor::host::{MetricsProvider, ServiceController, SysinfoMetrics, SystemdController};
use monitor::scheduler::SessionScheduler;
use monitor::services::{HealthService, NotificationSink, WebhookNotifier};
use monitor::web::{start_web_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("monitor=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting validator node monitor");

    let config_manager = ConfigManager::new("config").await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: {} reference endpoint(s), {} watched service(s), interval {}s",
        config.reference_endpoints.len(),
        config.services.len(),
        config.monitoring_interval_seconds
    );

    let notifier = Arc::new(WebhookNotifier::new(
        config.notification_webhook_url.clone(),
    )?);
    if notifier.is_enabled() {
        info!(
            "Notifications will be posted to {}",
            notifier.get_webhook_url()
        );
    } else {
        warn!("⚠️  NOTIFICATIONS DISABLED ⚠️");
        warn!("Set 'notification_webhook_url' in config/main.toml to deliver monitoring updates");
    }

    let services: Arc<dyn ServiceController> = Arc::new(SystemdController::new());
    let metrics: Arc<dyn MetricsProvider> = Arc::new(SysinfoMetrics::new());

    let health_service = Arc::new(HealthService::new(
        config.clone(),
        services.clone(),
        metrics.clone(),
    )?);
    info!("Health service initialized");

    let sink: Arc<dyn NotificationSink> = notifier;
    let scheduler = SessionScheduler::new(
        health_service.clone(),
        sink,
        config.monitoring_interval(),
        config.initial_delay(),
    );

    let state = AppState::new(
        config.clone(),
        health_service,
        scheduler.clone(),
        services,
        metrics,
    );

    info!("Starting web server on {}:{}", config.host, config.port);
    let served = start_web_server(state, shutdown_signal()).await;

    // Torn down with the server: no session keeps firing after exit
    scheduler.shutdown().await;

    if let Err(e) = served {
        error!("Web server stopped with error: {}", e);
        return Err(e);
    }

    info!("Monitor stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
