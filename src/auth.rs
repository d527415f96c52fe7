//! Access token supply for the Authorization header.

use crate::error::{Error, Result};
use async_trait::async_trait;

/// Supplies a bearer token. Must be safe to share across concurrent CRUD calls.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// A fixed token, e.g. one issued out of band and passed in the provider block.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        if self.0.is_empty() {
            return Err(Error::Auth("no access token configured".into()));
        }
        Ok(self.0.clone())
    }
}
