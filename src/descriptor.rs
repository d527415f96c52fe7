//! Resource descriptor: schema, path and hooks that define one resource type's CRUD behavior.

use crate::data::ResourceData;
use crate::error::{Error, Result};
use crate::hooks::{BodyHook, IdExtractor, RequestEnvelope, RequestHook, ResponseEnvelope, ResponseHook};
use crate::schema::FieldSchema;
use crate::value::WireValue;
use std::fmt;
use std::sync::Arc;

pub type PathFn = Arc<dyn Fn(&dyn ResourceData) -> Result<String> + Send + Sync>;

/// Base path of a resource, relative to the API url.
#[derive(Clone)]
pub enum ResourcePath {
    Static(String),
    /// Computed from configuration, e.g. a client nested under its parent issuer.
    Computed(PathFn),
}

impl ResourcePath {
    pub fn resolve(&self, data: &dyn ResourceData) -> Result<String> {
        match self {
            ResourcePath::Static(path) => Ok(path.clone()),
            ResourcePath::Computed(f) => f(data).map_err(|e| match e {
                Error::PathResolution(_) => e,
                other => Error::PathResolution(other.to_string()),
            }),
        }
    }
}

impl fmt::Debug for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourcePath::Static(path) => f.debug_tuple("Static").field(path).finish(),
            ResourcePath::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A path built by substituting a required string field into `template` at `{}`.
pub fn path_from_field(template: &'static str, field: &'static str) -> ResourcePath {
    ResourcePath::Computed(Arc::new(move |data: &dyn ResourceData| match data.get(field) {
        WireValue::String(value) if !value.is_empty() => Ok(template.replacen("{}", &value, 1)),
        _ => Err(Error::PathResolution(format!(
            "'{}' field is required and must be a string",
            field
        ))),
    }))
}

#[derive(Clone, Default)]
pub struct RequestHooks {
    pub body: Vec<BodyHook>,
    pub envelope: Vec<RequestHook>,
}

#[derive(Clone, Default)]
pub struct ResponseHooks {
    pub body: Vec<BodyHook>,
    pub envelope: Vec<ResponseHook>,
}

#[derive(Clone)]
pub struct ResourceDescriptor {
    /// Short name used in logs and errors.
    pub name: String,
    pub schema: Arc<FieldSchema>,
    pub path: ResourcePath,
    /// At most one instance exists server-side; urls carry no id suffix.
    pub singleton: bool,
    /// No update operation; any change means destroy and recreate.
    pub immutable: bool,
    pub request_hooks: RequestHooks,
    pub response_hooks: ResponseHooks,
    pub id_extractor: Option<IdExtractor>,
}

impl ResourceDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>, schema: FieldSchema) -> Self {
        Self::with_path(name, ResourcePath::Static(path.into()), schema)
    }

    pub fn with_path(name: impl Into<String>, path: ResourcePath, schema: FieldSchema) -> Self {
        Self {
            name: name.into(),
            schema: Arc::new(schema),
            path,
            singleton: false,
            immutable: false,
            request_hooks: RequestHooks::default(),
            response_hooks: ResponseHooks::default(),
            id_extractor: None,
        }
    }

    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }

    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn request_body_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(WireValue) -> Result<WireValue> + Send + Sync + 'static,
    {
        self.request_hooks.body.push(Arc::new(f));
        self
    }

    pub fn request_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(RequestEnvelope) -> Result<RequestEnvelope> + Send + Sync + 'static,
    {
        self.request_hooks.envelope.push(Arc::new(f));
        self
    }

    pub fn response_body_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(WireValue) -> Result<WireValue> + Send + Sync + 'static,
    {
        self.response_hooks.body.push(Arc::new(f));
        self
    }

    pub fn response_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(ResponseEnvelope) -> Result<ResponseEnvelope> + Send + Sync + 'static,
    {
        self.response_hooks.envelope.push(Arc::new(f));
        self
    }

    pub fn id_extractor<F>(mut self, f: F) -> Self
    where
        F: Fn(&WireValue, &WireValue) -> Option<String> + Send + Sync + 'static,
    {
        self.id_extractor = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("singleton", &self.singleton)
            .field("immutable", &self.immutable)
            .field("request_hooks", &(self.request_hooks.body.len() + self.request_hooks.envelope.len()))
            .field("response_hooks", &(self.response_hooks.body.len() + self.response_hooks.envelope.len()))
            .field("id_extractor", &self.id_extractor.is_some())
            .finish()
    }
}
