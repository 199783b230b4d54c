//! Eduvault API Server
//!
//! Main entry point for the Eduvault resource service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eduvault_api::{AppState, create_router};
use eduvault_core::storage::{
    BackendId, CloudStoreConfig, LocalStoreConfig, StorageConfig, StorageRouter,
};
use eduvault_db::connect;
use eduvault_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eduvault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        access_token_expires_minutes: (config.jwt.access_token_expiry_secs / 60) as i64,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Create storage router
    let storage = StorageRouter::from_config(storage_config(&config))?;
    info!(
        upload_to_cloud = config.storage.upload_to_cloud,
        "Storage router configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        storage: Arc::new(storage),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the storage configuration from application settings.
fn storage_config(config: &AppConfig) -> StorageConfig {
    let settings = &config.storage;

    let mut storage = StorageConfig::new(LocalStoreConfig {
        endpoint: settings.local.endpoint.clone(),
        bucket: settings.local.bucket.clone(),
        access_key_id: settings.local.access_key_id.clone(),
        secret_access_key: settings.local.secret_access_key.clone(),
        region: settings.local.region.clone(),
    })
    .with_max_file_size(settings.max_file_size);

    if let Some(cloud) = &settings.cloud {
        storage = storage.with_cloud(CloudStoreConfig {
            account: cloud.account.clone(),
            access_key: cloud.access_key.clone(),
            container: cloud.container.clone(),
        });
    }
    if settings.upload_to_cloud {
        storage = storage.with_default_target(BackendId::Cloud);
    }
    if !settings.allowed_mime_types.is_empty() {
        storage = storage.with_allowed_mime_types(settings.allowed_mime_types.clone());
    }

    storage
}
