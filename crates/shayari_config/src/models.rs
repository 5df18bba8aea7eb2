// --- File: crates/shayari_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/shayari.db, loaded via SHAYARI__DATABASE__URL or DATABASE_URL
}

// --- Firebase Config ---
// Either key_path or service_account_base64 must be set for the backend to authenticate.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FirebaseConfig {
    pub project_id: Option<String>,
    /// Path to the service account JSON file.
    pub key_path: Option<String>,
    /// Base64 encoded service account JSON, for hosts that only offer env vars.
    pub service_account_base64: Option<String>,
    /// Override for the FCM endpoint, used by tests and emulators.
    pub api_base_url: Option<String>,
}

// --- Notification Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotificationConfig {
    /// Whether the scheduler runs at all. The manual trigger works either way.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between two scheduled dispatch cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Local `HH:MM` of the daily morning run. Empty disables it.
    #[serde(default = "default_daily_at")]
    pub daily_at: String,
    /// IANA timezone the daily run is scheduled in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_morning_title")]
    pub morning_title: String,
    #[serde(default = "default_title")]
    pub default_title: String,
    #[serde(default)]
    pub android_channel_id: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_secs: default_interval_secs(),
            daily_at: default_daily_at(),
            timezone: default_timezone(),
            morning_title: default_morning_title(),
            default_title: default_title(),
            android_channel_id: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    300
}

fn default_daily_at() -> String {
    "10:00".to_string()
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

fn default_morning_title() -> String {
    "Good Morning! ☀️".to_string()
}

fn default_title() -> String {
    "आज की शायरी 🌟".to_string()
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are additionally written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
