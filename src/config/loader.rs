//! Load provider config from the environment or from a JSON provider block.

use crate::auth::StaticToken;
use crate::client::HttpClient;
use crate::config::ProviderConfig;
use crate::error::{ConfigError, Result};
use crate::state::ProviderContext;
use std::sync::Arc;
use std::time::Duration;

pub const API_URL_VAR: &str = "MATTR_API_URL";
pub const ACCESS_TOKEN_VAR: &str = "MATTR_ACCESS_TOKEN";
pub const TIMEOUT_VAR: &str = "MATTR_TIMEOUT_SECS";

impl ProviderConfig {
    /// Read `MATTR_API_URL`, `MATTR_ACCESS_TOKEN` and optionally `MATTR_TIMEOUT_SECS`.
    /// A `.env` file in the working directory is consulted as well.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_VAR).ok_or(ConfigError::Missing("api_url"))?;
        let access_token = lookup(ACCESS_TOKEN_VAR).ok_or(ConfigError::Missing("access_token"))?;
        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                field: "timeout_secs",
                reason: e.to_string(),
            })?),
            None => None,
        };
        ProviderConfig {
            api_url,
            access_token,
            timeout_secs,
        }
        .validate()
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ProviderConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()
    }

    /// Build the context every CRUD call receives.
    pub fn into_context(self) -> Result<ProviderContext> {
        let client = match self.timeout_secs {
            Some(secs) => HttpClient::with_timeout(Duration::from_secs(secs))?,
            None => HttpClient::new(),
        };
        tracing::debug!(api_url = %self.api_url, timeout_secs = ?self.timeout_secs, "provider configured");
        Ok(ProviderContext::new(
            self.api_url,
            Arc::new(client),
            Arc::new(StaticToken::new(self.access_token)),
        ))
    }
}
