use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub apns: ApnsConfig,
    pub fcm: FcmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApnsConfig {
    pub key_id: String,
    pub team_id: String,
    /// Path to the `.p8` auth key file; read once at startup
    pub private_key_path: String,
    pub bundle_id: String,
    pub is_production: bool,
    /// Minutes after which a cached provider token is re-minted (default: 50)
    pub token_refresh_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmConfig {
    pub server_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")?,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
            apns: ApnsConfig {
                key_id: std::env::var("APNS_KEY_ID").unwrap_or_default(),
                team_id: std::env::var("APNS_TEAM_ID").unwrap_or_default(),
                private_key_path: std::env::var("APNS_PRIVATE_KEY_PATH").unwrap_or_default(),
                bundle_id: std::env::var("APNS_BUNDLE_ID")
                    .unwrap_or_else(|_| "com.example.app".to_string()),
                is_production: std::env::var("APNS_PRODUCTION")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
                token_refresh_minutes: std::env::var("APNS_TOKEN_REFRESH_MINUTES")
                    .unwrap_or_else(|_| "50".to_string())
                    .parse()?,
            },
            fcm: FcmConfig {
                server_key: std::env::var("FCM_SERVER_KEY").unwrap_or_default(),
            },
        })
    }
}
