/// Notification routing
///
/// Decides, per outbound notification, whether to deliver a realtime VoIP
/// call push or hand the request to the ordinary push pipeline, and drives
/// the collaborators for the chosen path.
use std::sync::Arc;

use courier_apns_auth::TokenCache;
use tracing::{info, warn};

use crate::error::DispatchError;
use crate::models::{
    CallMetadata, DeliveryPath, DispatchOutcome, NotificationKind, NotificationRequest,
    TargetPlatform,
};
use crate::services::apns_voip::RealtimePushDispatcher;
use crate::services::fcm_dispatch::OrdinaryPushDispatcher;
use crate::services::token_resolver::RecipientTokenResolver;

/// Pick the delivery path for a (kind, platform) pair.
///
/// Only call notifications to non-Android devices take the realtime path;
/// Android call UIs are woken by the ordinary data push.
pub fn classify(kind: NotificationKind, platform: TargetPlatform) -> DeliveryPath {
    match kind {
        NotificationKind::VoiceCall | NotificationKind::VideoCall
            if platform != TargetPlatform::Android =>
        {
            DeliveryPath::RealtimeCall
        }
        _ => DeliveryPath::Ordinary,
    }
}

pub struct NotificationRouter {
    resolver: RecipientTokenResolver,
    token_cache: Arc<TokenCache>,
    realtime: Arc<dyn RealtimePushDispatcher>,
    ordinary: Arc<dyn OrdinaryPushDispatcher>,
}

impl NotificationRouter {
    pub fn new(
        resolver: RecipientTokenResolver,
        token_cache: Arc<TokenCache>,
        realtime: Arc<dyn RealtimePushDispatcher>,
        ordinary: Arc<dyn OrdinaryPushDispatcher>,
    ) -> Self {
        Self {
            resolver,
            token_cache,
            realtime,
            ordinary,
        }
    }

    /// Dispatch one notification.
    ///
    /// A call push that cannot be delivered in realtime is dropped with an
    /// error, never downgraded to an ordinary push: a delayed call banner is
    /// worse than no banner, the caller sees the ring timeout either way.
    /// Errors surface to the caller; there are no retries at this layer.
    pub async fn dispatch(
        &self,
        request: NotificationRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        match classify(request.kind, request.platform) {
            DeliveryPath::Ordinary => {
                self.ordinary.send(&request).await?;
                Ok(DispatchOutcome {
                    path: DeliveryPath::Ordinary,
                    provider_message_id: None,
                })
            }
            DeliveryPath::RealtimeCall => {
                let voip_token = self.resolver.resolve(&request.recipient_id).await.map_err(
                    |err| {
                        warn!(
                            "Dropping {} push for recipient {}: {}",
                            request.kind.as_str(),
                            request.recipient_id,
                            err
                        );
                        err
                    },
                )?;

                let credential = self.token_cache.current().await?;

                let metadata = CallMetadata::from_request(&request);
                let apns_id = self
                    .realtime
                    .send(&credential.token, &voip_token, &metadata)
                    .await?;

                info!(
                    "Realtime call push dispatched for recipient {} ({})",
                    request.recipient_id,
                    request.kind.as_str()
                );

                Ok(DispatchOutcome {
                    path: DeliveryPath::RealtimeCall,
                    provider_message_id: Some(apns_id),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_table() {
        use NotificationKind::{Ordinary, VideoCall, VoiceCall};
        use TargetPlatform::{Android, Ios};

        let table = [
            (Ordinary, Android, DeliveryPath::Ordinary),
            (Ordinary, Ios, DeliveryPath::Ordinary),
            (VoiceCall, Android, DeliveryPath::Ordinary),
            (VoiceCall, Ios, DeliveryPath::RealtimeCall),
            (VideoCall, Android, DeliveryPath::Ordinary),
            (VideoCall, Ios, DeliveryPath::RealtimeCall),
        ];

        for (kind, platform, expected) in table {
            assert_eq!(
                classify(kind, platform),
                expected,
                "({:?}, {:?})",
                kind,
                platform
            );
        }
    }
}
