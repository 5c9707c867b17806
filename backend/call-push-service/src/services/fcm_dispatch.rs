use async_trait::async_trait;
use tracing::{error, info};

use crate::error::DispatchError;
use crate::models::NotificationRequest;

/// Ordinary push handoff seam. Payload construction happens upstream; the
/// request's payload map is forwarded untouched.
#[async_trait]
pub trait OrdinaryPushDispatcher: Send + Sync {
    async fn send(&self, request: &NotificationRequest) -> Result<(), DispatchError>;
}

const FCM_LEGACY_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Thin client for the legacy FCM HTTP endpoint the existing pipeline uses
pub struct FcmLegacyClient {
    http_client: reqwest::Client,
    server_key: String,
}

impl FcmLegacyClient {
    pub fn new(server_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            server_key,
        }
    }
}

#[async_trait]
impl OrdinaryPushDispatcher for FcmLegacyClient {
    async fn send(&self, request: &NotificationRequest) -> Result<(), DispatchError> {
        let response = self
            .http_client
            .post(FCM_LEGACY_ENDPOINT)
            .header("Authorization", format!("key={}", self.server_key))
            .header("Content-Type", "application/json")
            .json(&request.payload)
            .send()
            .await
            .map_err(|e| DispatchError::Ordinary(format!("FCM send request failed: {}", e)))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                info!(
                    "Ordinary push handed off for recipient {}",
                    request.recipient_id
                );
                Ok(())
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                error!(
                    "FCM handoff failed for recipient {}: {}",
                    request.recipient_id, status
                );
                Err(DispatchError::Ordinary(format!(
                    "FCM API error: {} - {}",
                    status, body
                )))
            }
        }
    }
}
