//! Provider config validation.

use crate::config::ProviderConfig;
use crate::error::ConfigError;

impl ProviderConfig {
    /// Check required settings and normalize `api_url` (no trailing slash).
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let url = self.api_url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(ConfigError::Missing("api_url"));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "api_url",
                reason: format!("'{}' is not an http(s) url", url),
            });
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::Missing("access_token"));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        self.api_url = url;
        Ok(self)
    }
}
