// File: monitor/src/services/notification_service.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::alerts::{AlertMessage, MessageControl};
use crate::constants::http::WEBHOOK_TIMEOUT;
use crate::errors::NotifyError;

/// Destination for alert messages. Delivery is fire-and-forget from the
/// scheduler's point of view: errors are logged, never retried.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, session_id: &str, message: &AlertMessage) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkPayload<'a> {
    pub timestamp: DateTime<Utc>,
    pub session_id: &'a str,
    pub chunk_index: usize,
    pub chunk_count: usize,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<&'a MessageControl>,
}

/// Posts every chunk as its own JSON payload to a chat bridge webhook
#[derive(Clone)]
pub struct WebhookNotifier {
    webhook_url: String,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(webhook_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for WebhookNotifier: {}", e))?;

        Ok(Self {
            webhook_url,
            client,
        })
    }

    pub fn is_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }

    pub fn get_webhook_url(&self) -> &str {
        &self.webhook_url
    }

    async fn post_chunk(&self, payload: &ChunkPayload<'_>) -> Result<(), NotifyError> {
        let response = timeout(
            WEBHOOK_TIMEOUT,
            self.client.post(&self.webhook_url).json(payload).send(),
        )
        .await
        .map_err(|_| NotifyError::DeliveryFailed {
            session_id: payload.session_id.to_string(),
            reason: "webhook timeout".to_string(),
        })?
        .map_err(|e| NotifyError::DeliveryFailed {
            session_id: payload.session_id.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected {
                session_id: payload.session_id.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn deliver(&self, session_id: &str, message: &AlertMessage) -> Result<(), NotifyError> {
        if !self.is_enabled() {
            debug!("No webhook URL configured, skipping delivery for session {}", session_id);
            return Ok(());
        }

        let chunk_count = message.len();
        let timestamp = Utc::now();

        // Stop at the first failure so a session never sees chunks out of order
        for (chunk_index, text, control) in message.deliveries() {
            let payload = ChunkPayload {
                timestamp,
                session_id,
                chunk_index,
                chunk_count,
                text,
                control,
            };
            self.post_chunk(&payload).await?;
        }

        info!(
            "Delivered {} chunk(s) to session {}",
            chunk_count, session_id
        );
        Ok(())
    }
}
