use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::error::StoreError;
use crate::models::{DeviceRecord, TargetPlatform};

/// Read-only access to device/user records
///
/// The record lifecycle (registration, token rotation) is owned by the
/// account backend; this service only looks records up by recipient id.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn lookup(&self, recipient_id: &str) -> Result<Option<DeviceRecord>, StoreError>;
}

/// Postgres-backed device store over the legacy `user_details` table
pub struct PgDeviceStore {
    pool: PgPool,
}

impl PgDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for PgDeviceStore {
    async fn lookup(&self, recipient_id: &str) -> Result<Option<DeviceRecord>, StoreError> {
        let query = "SELECT uid, device_type, voip_token FROM user_details WHERE uid = $1";

        let row = sqlx::query(query)
            .bind(recipient_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(row.map(|row| {
            let device_type: Option<String> = row.get("device_type");
            DeviceRecord {
                recipient_id: row.get("uid"),
                platform: TargetPlatform::from_device_type(device_type.as_deref().unwrap_or("")),
                voip_token: row.get("voip_token"),
            }
        }))
    }
}
