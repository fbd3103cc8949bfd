//! # Client Configuration
//!
//! Where the backend lives and how long a list fetch may take.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOFFO_API_URL=https://api.example.com/api/v1                       │
//! │     BOFFO_ACCESS_TOKEN=eyJ...                                          │
//! │     BOFFO_REQUEST_TIMEOUT_SECS=15                                      │
//! │     BOFFO_DEFAULT_PAGE_SIZE=20                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/boffo/client.toml (Linux)                                │
//! │     ~/Library/Application Support/com.boffo.client/client.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080/api/v1, 30s request, 10s connect, 10 rows    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "http://localhost:8080/api/v1"
//! access_token = "eyJhbGciOi..."   # optional
//! request_timeout_secs = 30
//! connect_timeout_secs = 10
//!
//! [list]
//! default_page_size = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use boffo_core::PageSize;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Connection settings for the REST backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every resource path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Upper bound for one request, response body included (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            access_token: None,
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// =============================================================================
// List Settings
// =============================================================================

/// Defaults for newly opened list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSettings {
    /// Rows per page; one of 10, 20, 30, 40, 50.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_page_size() -> u32 {
    boffo_core::DEFAULT_PAGE_SIZE
}

impl Default for ListSettings {
    fn default() -> Self {
        ListSettings {
            default_page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub list: ListSettings,
}

impl ClientConfig {
    /// Loads configuration from file, then environment, then validates it.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = url::Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.api.connect_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        self.default_page_size()?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BOFFO_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(token) = std::env::var("BOFFO_ACCESS_TOKEN") {
            debug!("Using access token from environment");
            self.api.access_token = Some(token).filter(|t| !t.is_empty());
        }

        if let Ok(secs) = std::env::var("BOFFO_REQUEST_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.request_timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring invalid BOFFO_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Ok(size) = std::env::var("BOFFO_DEFAULT_PAGE_SIZE") {
            match size.parse::<u32>() {
                Ok(s) => self.list.default_page_size = s,
                Err(_) => warn!(value = %size, "Ignoring invalid BOFFO_DEFAULT_PAGE_SIZE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "boffo", "client")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Page size new list views start with.
    pub fn default_page_size(&self) -> ClientResult<PageSize> {
        PageSize::new(self.list.default_page_size)
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.default_page_size().unwrap().get(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ws://localhost:8080".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://boffo.example.com/api/v1".to_string();
        assert!(config.validate().is_ok());

        config.api.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.api.request_timeout_secs = 5;
        config.list.default_page_size = 25;
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://boffo.example.com/api/v1"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.list.default_page_size, 10);
        assert!(config.api.access_token.is_none());
    }

    #[test]
    fn test_save_then_load_from_path() {
        let path = std::env::temp_dir()
            .join(format!("boffo-client-{}", uuid::Uuid::new_v4()))
            .join("client.toml");

        let mut config = ClientConfig::default();
        config.list.default_page_size = 30;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[list]"));

        let loaded: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.list.default_page_size, 30);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
