pub mod alerts;
pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod host;
pub mod scheduler;
pub mod services;
pub mod web;

// Re-export commonly used types
pub use alerts::{AlertFormatter, AlertMessage};
pub use config::{Config, ConfigManager};
pub use errors::{ConfigError, HealthError, NotifyError};
pub use scheduler::SessionScheduler;
pub use services::{HealthService, NotificationSink, WebhookNotifier};
