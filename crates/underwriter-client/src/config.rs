//! Configuration management for the analysis client

use serde::Deserialize;

use crate::error::Result;

/// Client configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub errors: ErrorPolicy,
}

/// Remote analysis service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the analysis service. Empty means same-origin.
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Join a service path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn default_api_url() -> String {
    std::env::var("UNDERWRITER_API_URL").unwrap_or_default()
}

fn default_timeout() -> u64 {
    30
}

/// Response cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Wrap the HTTP client in a caching layer
    #[serde(default)]
    pub enabled: bool,
    /// Maximum cache entries
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Cache TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_capacity: default_max_capacity(),
            ttl_seconds: default_ttl(),
        }
    }
}

fn default_max_capacity() -> u64 {
    256
}

fn default_ttl() -> u64 {
    300 // 5 minutes
}

/// Which failures reach the user.
///
/// Wallet analysis failures always produce a message. Catalog and deep-analysis
/// failures are swallowed unless `surface_protocol_errors` is set.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ErrorPolicy {
    #[serde(default)]
    pub surface_protocol_errors: bool,
}

impl ClientConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            // Start with defaults
            .set_default("api.base_url", default_api_url())?
            .set_default("api.timeout_seconds", default_timeout() as i64)?
            .set_default("cache.enabled", false)?
            .set_default("cache.max_capacity", default_max_capacity() as i64)?
            .set_default("cache.ttl_seconds", default_ttl() as i64)?
            .set_default("errors.surface_protocol_errors", false)?
            // Load from file if present
            .add_source(config::File::with_name("underwriter").required(false))
            // Override with environment variables (UNDERWRITER__API__BASE_URL, etc.)
            .add_source(
                config::Environment::with_prefix("UNDERWRITER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
