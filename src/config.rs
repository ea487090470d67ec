//! Runtime configuration for the sync bridge.
//!
//! Loaded from a TOML file or from the environment, with builder methods for
//! programmatic construction. Every field has a working local-development
//! default.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Window after a cross-system sync during which a matching event is treated
/// as externally originated, in milliseconds.
pub const DEFAULT_SYNC_THRESHOLD_MS: i64 = 10_000;

/// Configuration for the sync bridge process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the content store's REST API.
    pub content_store_url: String,
    /// Static bearer token for the content store, if it requires one.
    pub content_store_token: Option<String>,
    /// Base URL of the commerce backend's admin API.
    pub commerce_url: String,
    /// Bearer token for the commerce admin API.
    pub commerce_token: Option<String>,
    /// Webhook server bind host.
    pub host: String,
    /// Webhook server bind port.
    pub port: u16,
    /// Enable CORS on the webhook server.
    pub enable_cors: bool,
    /// Loop-guard window in milliseconds.
    pub sync_threshold_ms: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            content_store_url: "http://localhost:8055".to_string(),
            content_store_token: None,
            commerce_url: "http://localhost:9000".to_string(),
            commerce_token: None,
            host: "127.0.0.1".to_string(),
            port: 9600,
            enable_cors: true,
            sync_threshold_ms: DEFAULT_SYNC_THRESHOLD_MS,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the environment, falling back to defaults for
    /// anything unset.
    ///
    /// Recognized variables: `CONTENT_STORE_URL`, `CONTENT_STORE_TOKEN`,
    /// `COMMERCE_URL`, `COMMERCE_TOKEN`, `SYNC_HOST`, `SYNC_PORT`,
    /// `SYNC_THRESHOLD_MS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CONTENT_STORE_URL") {
            config.content_store_url = url;
        }
        if let Ok(token) = std::env::var("CONTENT_STORE_TOKEN") {
            config.content_store_token = Some(token);
        }
        if let Ok(url) = std::env::var("COMMERCE_URL") {
            config.commerce_url = url;
        }
        if let Ok(token) = std::env::var("COMMERCE_TOKEN") {
            config.commerce_token = Some(token);
        }
        if let Ok(host) = std::env::var("SYNC_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("SYNC_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(threshold) = std::env::var("SYNC_THRESHOLD_MS") {
            if let Ok(threshold) = threshold.parse() {
                config.sync_threshold_ms = threshold;
            }
        }

        config
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn with_content_store_url(mut self, url: impl Into<String>) -> Self {
        self.content_store_url = url.into();
        self
    }

    pub fn with_content_store_token(mut self, token: impl Into<String>) -> Self {
        self.content_store_token = Some(token.into());
        self
    }

    pub fn with_commerce_url(mut self, url: impl Into<String>) -> Self {
        self.commerce_url = url.into();
        self
    }

    pub fn with_commerce_token(mut self, token: impl Into<String>) -> Self {
        self.commerce_token = Some(token.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    pub fn with_sync_threshold_ms(mut self, threshold_ms: i64) -> Self {
        self.sync_threshold_ms = threshold_ms;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
