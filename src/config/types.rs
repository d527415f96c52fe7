//! Provider block: where the tenant API lives and how to authenticate against it.

use serde::Deserialize;

#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    /// Tenant base url, e.g. `https://tenant.vii.mattr.global`.
    pub api_url: String,
    pub access_token: String,
    /// Per-request timeout. The transport's default when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("access_token", &"..")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
