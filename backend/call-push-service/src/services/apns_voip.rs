/// APNs VoIP push client
///
/// Delivers the realtime call pushes that wake CallKit on the recipient's
/// device. Authentication is token-based: every request carries a bearer
/// provider token minted by `courier-apns-auth`.
use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::DispatchError;
use crate::models::CallMetadata;

/// Realtime push dispatch seam. The router only sees this trait; retry
/// policy, if any, lives behind it.
#[async_trait]
pub trait RealtimePushDispatcher: Send + Sync {
    /// Sends a call push, returning the provider-assigned message id
    async fn send(
        &self,
        auth_token: &str,
        voip_token: &str,
        metadata: &CallMetadata,
    ) -> Result<String, DispatchError>;
}

/// HTTP/2 client for the APNs VoIP endpoint
pub struct ApnsVoipClient {
    http_client: reqwest::Client,
    topic: String,
    host: &'static str,
}

impl ApnsVoipClient {
    /// # Arguments
    /// * `bundle_id` - App bundle id; the VoIP topic is `<bundle_id>.voip`
    /// * `is_production` - Selects the production or sandbox APNs host
    pub fn new(bundle_id: &str, is_production: bool) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            topic: format!("{}.voip", bundle_id),
            host: if is_production {
                "api.push.apple.com"
            } else {
                "api.sandbox.push.apple.com"
            },
        }
    }

    /// VoIP payload: content-available wakes the app, the remaining fields
    /// feed the incoming-call UI
    fn build_payload(metadata: &CallMetadata) -> serde_json::Value {
        json!({
            "aps": { "content-available": 1 },
            "caller_name": metadata.caller_name,
            "room_id": metadata.room_id,
            "receiver_id": metadata.recipient_id,
            "caller_photo": metadata.caller_photo,
            "caller_number": metadata.caller_number,
            "call_type": metadata.call_description,
        })
    }
}

#[async_trait]
impl RealtimePushDispatcher for ApnsVoipClient {
    async fn send(
        &self,
        auth_token: &str,
        voip_token: &str,
        metadata: &CallMetadata,
    ) -> Result<String, DispatchError> {
        let token_prefix = voip_token.chars().take(8).collect::<String>();
        let url = format!("https://{}/3/device/{}", self.host, voip_token);

        let response = self
            .http_client
            .post(&url)
            .header("authorization", format!("bearer {}", auth_token))
            .header("apns-topic", &self.topic)
            .header("apns-push-type", "voip")
            .header("apns-priority", "10")
            .header("apns-expiration", "0")
            .json(&Self::build_payload(metadata))
            .send()
            .await
            .map_err(|e| DispatchError::Provider(format!("APNs request failed: {}", e)))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let apns_id = response
                    .headers()
                    .get("apns-id")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
                    .unwrap_or_else(|| Uuid::new_v4().to_string());

                info!(
                    "VoIP push sent to token {} (apns_id: {})",
                    token_prefix, apns_id
                );
                Ok(apns_id)
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                error!("APNs VoIP send failed for token {}: {}", token_prefix, status);
                Err(DispatchError::Provider(format!(
                    "APNs API error: {} - {}",
                    status, body
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voip_topic_suffix() {
        let client = ApnsVoipClient::new("com.example.app", true);
        assert_eq!(client.topic, "com.example.app.voip");
        assert_eq!(client.host, "api.push.apple.com");

        let sandbox = ApnsVoipClient::new("com.example.app", false);
        assert_eq!(sandbox.host, "api.sandbox.push.apple.com");
    }

    #[test]
    fn test_voip_payload_shape() {
        let metadata = CallMetadata {
            caller_name: "Alice".to_string(),
            room_id: "room-42".to_string(),
            recipient_id: "u1".to_string(),
            caller_photo: None,
            caller_number: Some("+15550100".to_string()),
            call_description: "Incoming voice call",
        };

        let payload = ApnsVoipClient::build_payload(&metadata);
        assert_eq!(payload["aps"]["content-available"], 1);
        assert_eq!(payload["caller_name"], "Alice");
        assert_eq!(payload["room_id"], "room-42");
        assert_eq!(payload["receiver_id"], "u1");
        assert_eq!(payload["call_type"], "Incoming voice call");
        assert!(payload["caller_photo"].is_null());
    }
}
