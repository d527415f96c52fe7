//! HTTP capability: the transport the CRUD service talks through.

use crate::error::{Error, Method, Result};
use crate::value::WireValue;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub type Headers = BTreeMap<String, String>;

/// JSON-over-HTTP transport. Implementations encode bodies on the way out and decode them on
/// the way in; a `WireValue::Bytes` body is sent as-is. An empty or 204 response is `Null`.
#[async_trait]
pub trait Client: Send + Sync {
    async fn post(&self, url: &str, headers: &Headers, body: WireValue) -> Result<WireValue>;
    async fn get(&self, url: &str, headers: &Headers) -> Result<WireValue>;
    async fn put(&self, url: &str, headers: &Headers, body: WireValue) -> Result<WireValue>;
    async fn delete(&self, url: &str, headers: &Headers) -> Result<()>;
}

/// `Client` backed by reqwest. No retries: a non-2xx status is returned as `Error::HttpStatus`.
#[derive(Clone, Debug, Default)]
pub struct HttpClient {
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &Headers,
        body: Option<WireValue>,
    ) -> Result<WireValue> {
        let mut req = self.http.request(reqwest_method(method), url);
        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }
        req = req.header(ACCEPT, "application/json");
        match body {
            Some(WireValue::Bytes(bytes)) => {
                tracing::debug!(len = bytes.len(), "uploading binary payload");
                if !headers.keys().any(|k| k.eq_ignore_ascii_case("content-type")) {
                    req = req.header(CONTENT_TYPE, "application/zip");
                }
                req = req.body(bytes);
            }
            Some(body) => {
                req = req.json(&body);
            }
            None => {}
        }

        tracing::debug!(method = %method, url = %url, "request");
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %text, "error response");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                method,
                url: url.to_string(),
                detail: parse_api_error(&text),
            });
        }
        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(WireValue::Null);
        }
        serde_json::from_str::<WireValue>(&text)
            .map_err(|e| Error::BodyDecode(format!("{} {}: {}", method, url, e)))
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn post(&self, url: &str, headers: &Headers, body: WireValue) -> Result<WireValue> {
        self.send(Method::Post, url, headers, Some(body)).await
    }

    async fn get(&self, url: &str, headers: &Headers) -> Result<WireValue> {
        self.send(Method::Get, url, headers, None).await
    }

    async fn put(&self, url: &str, headers: &Headers, body: WireValue) -> Result<WireValue> {
        self.send(Method::Put, url, headers, Some(body)).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<()> {
        self.send(Method::Delete, url, headers, None).await.map(|_| ())
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorBody {
    code: String,
    message: String,
    details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorDetail {
    msg: String,
    param: String,
    location: String,
}

/// Render the vendor error body (`{code, message, details}`) when the response carries one.
fn parse_api_error(text: &str) -> Option<String> {
    let body: ApiErrorBody = serde_json::from_str(text).ok()?;
    let mut parts = Vec::new();
    if !body.code.is_empty() && !body.message.is_empty() {
        parts.push(format!("'{}' error: {}", body.code, body.message));
    }
    for d in &body.details {
        if !d.param.is_empty() && !d.msg.is_empty() {
            parts.push(format!("error in {} with '{}': {}", d.location, d.param, d.msg));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
