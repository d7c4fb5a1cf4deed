//! Gate configuration for HTTP pipelines.
//!
//! Configuration is loaded from environment variables with defaults that
//! match the `Authorized-Role` header convention.

use axum::http::HeaderName;
use rolegate::AUTHORIZED_ROLE_HEADER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// How guarded routes read the role token and answer denials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Request header carrying the role name.
    pub role_header: String,

    /// Body sent with every 403 response. Must stay generic.
    pub deny_body: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            role_header: AUTHORIZED_ROLE_HEADER.to_string(),
            deny_body: "Forbidden".to_string(),
        }
    }
}

impl GateConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ROLEGATE_ROLE_HEADER`: Header carrying the role name (default: Authorized-Role)
    /// - `ROLEGATE_DENY_BODY`: Body of forbidden responses (default: Forbidden)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            role_header: std::env::var("ROLEGATE_ROLE_HEADER").unwrap_or(default.role_header),
            deny_body: std::env::var("ROLEGATE_DENY_BODY").unwrap_or(default.deny_body),
        }
    }

    /// Parse the configured role header name.
    pub fn header_name(&self) -> Result<HeaderName, ConfigError> {
        HeaderName::from_bytes(self.role_header.as_bytes()).map_err(|e| {
            ConfigError::InvalidValue {
                key: "role_header".to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.header_name()?;
        Ok(())
    }
}
