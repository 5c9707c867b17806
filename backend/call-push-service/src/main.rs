use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use call_push_service::{
    handlers::{health, notifications::register_routes as register_notifications},
    metrics, ApnsVoipClient, Config, FcmLegacyClient, NotificationRouter, PgDeviceStore,
    RecipientTokenResolver,
};
use courier_apns_auth::{ApnsCredentialConfig, CredentialSigner, TokenCache};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting call push service");

    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    // Fail fast on unusable APNs credentials before serving any traffic
    let private_key_pem = std::fs::read_to_string(&config.apns.private_key_path)
        .with_context(|| format!("failed to read {}", config.apns.private_key_path))?;
    let credentials = ApnsCredentialConfig::try_new(
        config.apns.key_id.clone(),
        config.apns.team_id.clone(),
        private_key_pem,
    )?;
    let signer = CredentialSigner::new(credentials)?;
    let token_cache = Arc::new(
        TokenCache::new(signer)
            .with_refresh_after(chrono::Duration::minutes(config.apns.token_refresh_minutes)),
    );
    tracing::info!(
        "APNs credentials validated (key_id={}, production={})",
        config.apns.key_id,
        config.apns.is_production
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Successfully connected to database");

    let store = Arc::new(PgDeviceStore::new(db_pool));
    let resolver = RecipientTokenResolver::new(store);
    let realtime = Arc::new(ApnsVoipClient::new(
        &config.apns.bundle_id,
        config.apns.is_production,
    ));
    let ordinary = Arc::new(FcmLegacyClient::new(config.fcm.server_key.clone()));

    let router = Arc::new(NotificationRouter::new(
        resolver,
        token_cache,
        realtime,
        ordinary,
    ));

    let addr = format!("0.0.0.0:{}", config.app.port);
    tracing::info!("Starting HTTP server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(router.clone()))
            .configure(register_notifications)
            .route("/health", web::get().to(health))
            .route("/metrics", web::get().to(metrics::serve_metrics))
    })
    .bind(&addr)?
    .run()
    .await?;

    Ok(())
}
