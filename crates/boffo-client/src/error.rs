//! # Client Error Types
//!
//! Error types for list fetching and client setup.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │  RequestError (one per fetch)   │  │  ClientError (setup)        │  │
//! │  │                                 │  │                             │  │
//! │  │  Network  no response reached   │  │  InvalidConfig              │  │
//! │  │  Api      server sent message   │  │  InvalidUrl                 │  │
//! │  │  Unknown  anything else         │  │  ConfigLoadFailed           │  │
//! │  │                                 │  │  ConfigSaveFailed           │  │
//! │  └─────────────────────────────────┘  │  HttpClient                 │  │
//! │                                       └─────────────────────────────┘  │
//! │                                                                         │
//! │  Response → RequestError                                               │
//! │  ├── connect / DNS / timeout / aborted      → Network                  │
//! │  ├── 2xx with non-empty `message`           → Api { message }          │
//! │  ├── non-2xx with non-empty `message`       → Api { message }          │
//! │  └── non-2xx without message, bad JSON, ... → Unknown                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use boffo_core::CoreError;

/// Shown when a failure carries nothing the user can act on.
pub const FALLBACK_MESSAGE: &str = "Error while processing request try again later";

// =============================================================================
// Request Error
// =============================================================================

/// Why a single list or detail fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a business message.
    #[error("{message}")]
    Api { message: String },

    /// Malformed envelope, unexpected status, or anything else.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Error body sent by the backend, `{status_code, message}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl RequestError {
    /// Classifies a `reqwest` failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            RequestError::Network(err.to_string())
        } else {
            RequestError::Unknown(err.to_string())
        }
    }

    /// Classifies a non-2xx response from its status and raw body.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody {
                message: Some(message),
            }) if !message.is_empty() => RequestError::Api { message },
            _ => RequestError::Unknown(format!("unexpected HTTP status {}", status)),
        }
    }

    /// Text to show the user.
    pub fn message(&self) -> &str {
        match self {
            RequestError::Network(detail) => detail,
            RequestError::Api { message } => message,
            RequestError::Unknown(_) => FALLBACK_MESSAGE,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, RequestError::Network(_))
    }

    pub fn is_api(&self) -> bool {
        matches!(self, RequestError::Api { .. })
    }

    /// Whether re-issuing the same query might succeed.
    ///
    /// Nothing retries automatically; the CLI prints a retry hint.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RequestError::Network(_) | RequestError::Unknown(_))
    }
}

// =============================================================================
// Client Error
// =============================================================================

/// Result type alias for client setup operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Configuration and setup failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// A list query could not be composed.
    #[error(transparent)]
    Query(#[from] CoreError),

    /// A fetch failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl ClientError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Request(err) => err.message().to_string(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::HttpClient(err.to_string())
    }
}
