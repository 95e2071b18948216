// File: monitor/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::config::Config;
use crate::host::{MetricsProvider, ServiceController};
use crate::scheduler::SessionScheduler;
use crate::services::HealthService;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub health_service: Arc<HealthService>,
    pub scheduler: SessionScheduler,
    pub services: Arc<dyn ServiceController>,
    pub metrics: Arc<dyn MetricsProvider>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        health_service: Arc<HealthService>,
        scheduler: SessionScheduler,
        services: Arc<dyn ServiceController>,
        metrics: Arc<dyn MetricsProvider>,
    ) -> Self {
        Self {
            config,
            health_service,
            scheduler,
            services,
            metrics,
        }
    }
}
