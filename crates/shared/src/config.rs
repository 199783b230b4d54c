//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Object storage configuration.
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Object storage configuration.
///
/// The local backend is always present; the cloud backend is optional and,
/// when configured, can be selected as the target for new uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Local S3-compatible backend (MinIO).
    pub local: LocalStoreSettings,
    /// Public cloud backend (Azure Blob), optional.
    #[serde(default)]
    pub cloud: Option<CloudStoreSettings>,
    /// Route new uploads to the cloud backend when true.
    #[serde(default)]
    pub upload_to_cloud: bool,
    /// Maximum payload size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed MIME types; empty means "use the built-in allow-list".
    #[serde(default)]
    pub allowed_mime_types: Vec<String>,
}

/// Local S3-compatible storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalStoreSettings {
    /// Endpoint URL, e.g. `http://localhost:9000`.
    pub endpoint: String,
    /// Bucket name (provisioned for anonymous read).
    pub bucket: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Cloud blob storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudStoreSettings {
    /// Storage account name.
    pub account: String,
    /// Storage access key.
    pub access_key: String,
    /// Container name (public-read).
    pub container: String,
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("EDUVAULT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
