#![allow(dead_code)]

use async_trait::async_trait;
use mattr_provider::{Client, Error, Headers, Method, ProviderContext, StaticToken, WireValue};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const API_URL: &str = "https://test.api";

/// A request the stub received.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Value>,
}

#[derive(Clone, Debug)]
enum Reply {
    Body(Value),
    Status(u16),
}

/// `Client` answering from canned replies keyed by `"METHOD url"`, recording every request.
#[derive(Default)]
pub struct StubClient {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

impl StubClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, method: Method, path: &str, body: Value) {
        self.replies
            .lock()
            .unwrap()
            .insert(key(method, &format!("{}{}", API_URL, path)), Reply::Body(body));
    }

    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.replies
            .lock()
            .unwrap()
            .insert(key(method, &format!("{}{}", API_URL, path)), Reply::Status(status));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        self.requests()
            .last()
            .and_then(|r| r.body.clone())
            .expect("no request with a body")
    }

    fn answer(&self, method: Method, url: &str, headers: &Headers, body: Option<WireValue>) -> Result<WireValue, Error> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(Value::from),
        });
        match self.replies.lock().unwrap().get(&key(method, url)) {
            Some(Reply::Body(v)) => Ok(WireValue::from(v.clone())),
            Some(Reply::Status(status)) => Err(Error::HttpStatus {
                status: *status,
                method,
                url: url.to_string(),
                detail: None,
            }),
            None => Err(Error::HttpStatus {
                status: 404,
                method,
                url: url.to_string(),
                detail: Some(format!("no stub for {}", key(method, url))),
            }),
        }
    }
}

fn key(method: Method, url: &str) -> String {
    format!("{} {}", method, url)
}

#[async_trait]
impl Client for StubClient {
    async fn post(&self, url: &str, headers: &Headers, body: WireValue) -> Result<WireValue, Error> {
        self.answer(Method::Post, url, headers, Some(body))
    }

    async fn get(&self, url: &str, headers: &Headers) -> Result<WireValue, Error> {
        self.answer(Method::Get, url, headers, None)
    }

    async fn put(&self, url: &str, headers: &Headers, body: WireValue) -> Result<WireValue, Error> {
        self.answer(Method::Put, url, headers, Some(body))
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<(), Error> {
        self.answer(Method::Delete, url, headers, None).map(|_| ())
    }
}

pub fn context(client: Arc<StubClient>) -> ProviderContext {
    ProviderContext::new(API_URL, client, Arc::new(StaticToken::new("test-token")))
}
