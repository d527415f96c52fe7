//! Provider context passed explicitly into every CRUD call.

use crate::auth::TokenProvider;
use crate::client::{Client, Headers};
use crate::error::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProviderContext {
    /// Tenant API base, without trailing slash.
    pub api_url: String,
    pub client: Arc<dyn Client>,
    pub tokens: Arc<dyn TokenProvider>,
}

impl ProviderContext {
    pub fn new(api_url: impl Into<String>, client: Arc<dyn Client>, tokens: Arc<dyn TokenProvider>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            api_url,
            client,
            tokens,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub async fn auth_headers(&self) -> Result<Headers> {
        let token = self.tokens.access_token().await?;
        let mut headers = Headers::new();
        headers.insert("Authorization".into(), format!("Bearer {}", token));
        Ok(headers)
    }
}

impl std::fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderContext").field("api_url", &self.api_url).finish_non_exhaustive()
    }
}
