//! Registration contract exposed to the host: resource type name -> CRUD entry points + schema.

use crate::data::ResourceData;
use crate::descriptor::ResourceDescriptor;
use crate::error::{Error, Result};
use crate::resources;
use crate::schema::{validate_schema, FieldSchema};
use crate::service::CrudService;
use crate::state::ProviderContext;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One CRUD entry point of a registered resource.
#[async_trait]
pub trait Operation: Send + Sync {
    async fn call(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()>;
}

struct Create(CrudService);
struct Read(CrudService);
struct Update(CrudService);
struct Delete(CrudService);

#[async_trait]
impl Operation for Create {
    async fn call(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.0.create(data, ctx).await
    }
}

#[async_trait]
impl Operation for Read {
    async fn call(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.0.read(data, ctx).await
    }
}

#[async_trait]
impl Operation for Update {
    async fn call(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.0.update(data, ctx).await
    }
}

#[async_trait]
impl Operation for Delete {
    async fn call(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.0.delete(data, ctx).await
    }
}

/// A registered resource type. `update` is `None` for immutable resources.
pub struct Resource {
    pub schema: Arc<FieldSchema>,
    pub create: Box<dyn Operation>,
    pub read: Box<dyn Operation>,
    pub update: Option<Box<dyn Operation>>,
    pub delete: Box<dyn Operation>,
}

impl Resource {
    /// Validate the descriptor's schema and wire its operations.
    pub fn from_descriptor(descriptor: ResourceDescriptor) -> Result<Self> {
        validate_schema(&descriptor.schema).map_err(|e| match e {
            Error::InvalidSchema(reason) => Error::InvalidSchema(format!("{}: {}", descriptor.name, reason)),
            other => other,
        })?;
        let immutable = descriptor.immutable;
        let schema = descriptor.schema.clone();
        let service = CrudService::new(Arc::new(descriptor));
        let update: Option<Box<dyn Operation>> = if immutable {
            None
        } else {
            Some(Box::new(Update(service.clone())))
        };
        Ok(Self {
            schema,
            create: Box::new(Create(service.clone())),
            read: Box::new(Read(service.clone())),
            update,
            delete: Box::new(Delete(service)),
        })
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("fields", &self.schema.len())
            .field("update", &self.update.is_some())
            .finish_non_exhaustive()
    }
}

/// Registry of resource types keyed by the host-facing type name.
#[derive(Debug, Default)]
pub struct Provider {
    resources: BTreeMap<String, Resource>,
}

impl Provider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every MATTR resource this crate ships.
    pub fn mattr() -> Result<Self> {
        Self::new()
            .with_resource("mattr_webhook", resources::webhook())?
            .with_resource("mattr_did", resources::did())?
            .with_resource("mattr_claim_source", resources::claim_source())?
            .with_resource("mattr_issuer_client", resources::issuer_client())?
            .with_resource("mattr_verifier_client", resources::verifier_client())?
            .with_resource("mattr_issuer", resources::issuer())?
            .with_resource("mattr_verifier", resources::verifier())?
            .with_resource("mattr_credential_web", resources::credential_config())?
            .with_resource("mattr_custom_domain", resources::custom_domain())
    }

    pub fn with_resource(mut self, name: impl Into<String>, descriptor: ResourceDescriptor) -> Result<Self> {
        let name = name.into();
        let resource = Resource::from_descriptor(descriptor)?;
        tracing::debug!(resource = %name, update = resource.update.is_some(), "registered resource");
        self.resources.insert(name, resource);
        Ok(self)
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    fn lookup(&self, name: &str) -> Result<&Resource> {
        self.resource(name)
            .ok_or_else(|| Error::UnknownResource(name.to_string()))
    }

    pub async fn create(&self, name: &str, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.lookup(name)?.create.call(data, ctx).await
    }

    pub async fn read(&self, name: &str, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.lookup(name)?.read.call(data, ctx).await
    }

    pub async fn update(&self, name: &str, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        match &self.lookup(name)?.update {
            Some(update) => update.call(data, ctx).await,
            None => Err(Error::UnsupportedOperation {
                resource: name.to_string(),
                operation: "update",
            }),
        }
    }

    pub async fn delete(&self, name: &str, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.lookup(name)?.delete.call(data, ctx).await
    }
}
