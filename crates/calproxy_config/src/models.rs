// --- File: crates/calproxy_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Upstream (Cal.com) Config ---
// Everything the adapters need to talk to the scheduling service.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin of the scheduling service, without trailing slash.
    pub origin: String,
    /// Event type slug used when the availability query omits one.
    pub default_event_slug: String,
    /// Time zone used when the availability query omits one.
    pub default_time_zone: String,
    /// Suffix stripped from the profile page `<title>` in the meta-tag fallback.
    pub title_suffix: String,
    /// Language tag sent with every booking submission.
    pub language: String,
    /// Meeting location marker sent with every booking submission.
    pub default_location: String,
    /// Request timeout; the shared client (30s) is used when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "https://cal.com".to_string(),
            default_event_slug: "15min".to_string(),
            default_time_zone: "Asia/Calcutta".to_string(),
            title_suffix: "| Cal.com".to_string(),
            language: "en".to_string(),
            default_location: "integrations:daily".to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// The origin with any trailing slash removed, ready for `format!("{origin}/path")`.
    pub fn base_url(&self) -> &str {
        self.origin.trim_end_matches('/')
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String, // trace | debug | info | warn | error
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
