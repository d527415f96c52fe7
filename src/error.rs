//! Typed errors returned to the host runtime.

use std::fmt;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// HTTP verb of a failed call, kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing provider setting: {0}")]
    Missing(&'static str),
    #[error("invalid provider setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("config load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to resolve request path: {0}")]
    PathResolution(String),
    #[error("got status code {status} from {method} {url}{}", detail_suffix(.detail))]
    HttpStatus {
        status: u16,
        method: Method,
        url: String,
        detail: Option<String>,
    },
    #[error("unable to decode body: {0}")]
    BodyDecode(String),
    #[error("unsupported value kind in body: {kind}")]
    UnsupportedValueKind { kind: &'static str },
    #[error("type mismatch for field '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: String,
        got: String,
    },
    #[error("hook: {0}")]
    Hook(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    #[error("unknown resource type: {0}")]
    UnknownResource(String),
    #[error("{operation} not supported by resource {resource}")]
    UnsupportedOperation {
        resource: String,
        operation: &'static str,
    },
    #[error("remote object {id} was created but could not be recorded, reconcile it manually: {source}")]
    PartialCreate {
        id: String,
        #[source]
        source: Box<Error>,
    },
    #[error("transport: {0}")]
    Transport(String),
    #[error("access token: {0}")]
    Auth(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(": {}", d),
        _ => String::new(),
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display() {
        let err = Error::HttpStatus {
            status: 404,
            method: Method::Get,
            url: "https://test.api/core/v1/webhooks/abc".into(),
            detail: None,
        };
        assert_eq!(
            err.to_string(),
            "got status code 404 from GET https://test.api/core/v1/webhooks/abc"
        );

        let err = Error::HttpStatus {
            status: 400,
            method: Method::Post,
            url: "https://test.api/core/v1/webhooks".into(),
            detail: Some("'BadRequest' error: url must be https".into()),
        };
        assert_eq!(
            err.to_string(),
            "got status code 400 from POST https://test.api/core/v1/webhooks: 'BadRequest' error: url must be https"
        );
    }

    #[test]
    fn type_mismatch_display() {
        let err = Error::TypeMismatch {
            field: "disabled".into(),
            expected: "bool".into(),
            got: "string".into(),
        };
        assert_eq!(err.to_string(), "type mismatch for field 'disabled': expected bool, got string");
    }

    #[test]
    fn partial_create_keeps_source() {
        let err = Error::PartialCreate {
            id: "abc".into(),
            source: Box::new(Error::Hook("missing authorization".into())),
        };
        assert!(err.to_string().starts_with("remote object abc was created"));
        assert!(err.to_string().ends_with("hook: missing authorization"));
    }
}
