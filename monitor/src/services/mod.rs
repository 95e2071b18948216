// File: monitor/src/services/mod.rs

pub mod health_service;
pub mod notification_service;

pub use health_service::{HealthService, SyncCheck};
pub use notification_service::{NotificationSink, WebhookNotifier};
