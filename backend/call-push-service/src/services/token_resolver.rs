use std::sync::Arc;

use tracing::debug;

use crate::error::ResolveError;
use crate::services::device_store::DeviceStore;

/// APNs device/VoIP tokens are 32 bytes hex-encoded
const VOIP_TOKEN_LEN: usize = 64;

/// Looks up and validates a recipient's VoIP push token
pub struct RecipientTokenResolver {
    store: Arc<dyn DeviceStore>,
}

impl RecipientTokenResolver {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    /// Resolve the VoIP token for `recipient_id`.
    ///
    /// The token is returned exactly as stored; validation only ever rejects,
    /// it never normalizes or truncates.
    pub async fn resolve(&self, recipient_id: &str) -> Result<String, ResolveError> {
        let record = self
            .store
            .lookup(recipient_id)
            .await?
            .ok_or_else(|| ResolveError::NotFound(recipient_id.to_string()))?;

        let token = match record.voip_token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ResolveError::MissingToken(recipient_id.to_string())),
        };

        if token.len() != VOIP_TOKEN_LEN || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ResolveError::InvalidFormat {
                recipient_id: recipient_id.to_string(),
                token,
            });
        }

        debug!(
            "Resolved VoIP token for recipient {} (prefix {})",
            recipient_id,
            &token[..8]
        );

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::{DeviceRecord, TargetPlatform};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeStore {
        records: HashMap<String, DeviceRecord>,
    }

    impl FakeStore {
        fn with_token(token: Option<&str>) -> Arc<Self> {
            let mut records = HashMap::new();
            records.insert(
                "u1".to_string(),
                DeviceRecord {
                    recipient_id: "u1".to_string(),
                    platform: TargetPlatform::Ios,
                    voip_token: token.map(str::to_string),
                },
            );
            Arc::new(Self { records })
        }
    }

    #[async_trait]
    impl DeviceStore for FakeStore {
        async fn lookup(&self, recipient_id: &str) -> Result<Option<DeviceRecord>, StoreError> {
            Ok(self.records.get(recipient_id).cloned())
        }
    }

    const VALID_TOKEN: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn test_valid_token_returned_unchanged() {
        let resolver = RecipientTokenResolver::new(FakeStore::with_token(Some(VALID_TOKEN)));
        assert_eq!(resolver.resolve("u1").await.unwrap(), VALID_TOKEN);
    }

    #[tokio::test]
    async fn test_uppercase_hex_accepted() {
        let upper = VALID_TOKEN.to_uppercase();
        let resolver = RecipientTokenResolver::new(FakeStore::with_token(Some(&upper)));
        assert_eq!(resolver.resolve("u1").await.unwrap(), upper);
    }

    #[tokio::test]
    async fn test_unknown_recipient_is_not_found() {
        let resolver = RecipientTokenResolver::new(FakeStore::with_token(Some(VALID_TOKEN)));
        let err = resolver.resolve("nobody").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_absent_or_empty_token_is_missing() {
        for token in [None, Some("")] {
            let resolver = RecipientTokenResolver::new(FakeStore::with_token(token));
            let err = resolver.resolve("u1").await.unwrap_err();
            assert!(matches!(err, ResolveError::MissingToken(_)));
        }
    }

    #[tokio::test]
    async fn test_wrong_length_token_rejected() {
        let resolver = RecipientTokenResolver::new(FakeStore::with_token(Some("abc123")));
        let err = resolver.resolve("u1").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidFormat { .. }));
    }

    #[tokio::test]
    async fn test_non_hex_token_rejected() {
        let bad = "z".repeat(64);
        let resolver = RecipientTokenResolver::new(FakeStore::with_token(Some(&bad)));
        let err = resolver.resolve("u1").await.unwrap_err();
        match err {
            ResolveError::InvalidFormat { token, .. } => assert_eq!(token, bad),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }
}
