//! Generic CRUD execution against the vendor API.

use crate::data::ResourceData;
use crate::descriptor::ResourceDescriptor;
use crate::error::{Error, Result};
use crate::hooks::{run_body_hooks, RequestEnvelope, ResponseEnvelope};
use crate::state::ProviderContext;
use crate::transcode::{decode, encode, identifier, stage};
use crate::value::WireValue;
use std::sync::Arc;

/// What a completed call does with the identifier derived from its response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IdPolicy {
    /// Create: an identifier is mandatory.
    Require,
    /// Update: replace the id only when the response yields one.
    IfPresent,
    /// Read: the id is already known.
    Keep,
}

/// A response that went through hooks, decoding and schema staging, not yet written anywhere.
struct Received {
    fields: Vec<(String, WireValue)>,
    id: Option<String>,
}

/// Runs the four CRUD operations of one resource type. Holds no per-call state; every call
/// takes the instance data and the provider context explicitly.
#[derive(Clone, Debug)]
pub struct CrudService {
    descriptor: Arc<ResourceDescriptor>,
}

impl CrudService {
    pub fn new(descriptor: Arc<ResourceDescriptor>) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// POST the encoded configuration, then record the id and fields from the response.
    pub async fn create(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        let path = self.descriptor.path.resolve(&*data)?;
        let headers = ctx.auth_headers().await?;
        let request = self.prepare(&*data, ctx.url(&path), headers)?;
        let sent = request.body.clone();

        let response = ctx.client.post(&request.url, &request.headers, request.body).await?;

        let remote_id = response.get("id").and_then(identifier);
        let committed = self
            .receive(&request.url, &sent, response, IdPolicy::Require)
            .and_then(|received| {
                let received = self.singleton_fallback(received, &path);
                self.commit(data, received, IdPolicy::Require)
            });
        if let Err(e) = committed {
            return Err(Error::PartialCreate {
                id: remote_id.unwrap_or_else(|| "<unknown>".to_string()),
                source: Box::new(e),
            });
        }

        tracing::info!(resource = %self.descriptor.name, operation = "create", id = %data.id(), "resource created");
        Ok(())
    }

    /// GET the instance and refresh its fields. The id is left as is.
    pub async fn read(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        let url = self.instance_url(&*data, ctx)?;
        let headers = ctx.auth_headers().await?;

        let response = ctx.client.get(&url, &headers).await?;

        let received = self.receive(&url, &WireValue::Null, response, IdPolicy::Keep)?;
        self.commit(data, received, IdPolicy::Keep)?;

        tracing::info!(resource = %self.descriptor.name, operation = "read", id = %data.id(), "resource read");
        Ok(())
    }

    /// PUT the encoded configuration to the instance url. Immutable resources refuse.
    pub async fn update(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        if self.descriptor.immutable {
            return Err(Error::UnsupportedOperation {
                resource: self.descriptor.name.clone(),
                operation: "update",
            });
        }
        let url = self.instance_url(&*data, ctx)?;
        let headers = ctx.auth_headers().await?;
        let request = self.prepare(&*data, url, headers)?;
        let sent = request.body.clone();

        let response = ctx.client.put(&request.url, &request.headers, request.body).await?;

        let received = self.receive(&request.url, &sent, response, IdPolicy::IfPresent)?;
        self.commit(data, received, IdPolicy::IfPresent)?;

        tracing::info!(resource = %self.descriptor.name, operation = "update", id = %data.id(), "resource updated");
        Ok(())
    }

    /// DELETE the instance. Clearing the id is left to the host.
    pub async fn delete(&self, data: &mut dyn ResourceData, ctx: &ProviderContext) -> Result<()> {
        let url = self.instance_url(&*data, ctx)?;
        let headers = ctx.auth_headers().await?;

        ctx.client.delete(&url, &headers).await?;

        tracing::info!(resource = %self.descriptor.name, operation = "delete", id = %data.id(), "resource deleted");
        Ok(())
    }

    /// Resolved base url, with `/{id}` appended unless the resource is a singleton.
    fn instance_url(&self, data: &dyn ResourceData, ctx: &ProviderContext) -> Result<String> {
        let base = ctx.url(&self.descriptor.path.resolve(data)?);
        if self.descriptor.singleton {
            return Ok(base);
        }
        if data.id().is_empty() {
            return Err(Error::PathResolution(format!(
                "{} instance has no id",
                self.descriptor.name
            )));
        }
        Ok(format!("{}/{}", base, data.id()))
    }

    /// Encode, then run request hooks: body hooks first, then envelope hooks.
    fn prepare(
        &self,
        data: &dyn ResourceData,
        url: String,
        headers: crate::client::Headers,
    ) -> Result<RequestEnvelope> {
        let hooks = &self.descriptor.request_hooks;
        let body = encode(&self.descriptor.schema, data)?;
        let body = run_body_hooks(&hooks.body, body)?;
        if !hooks.body.is_empty() || !hooks.envelope.is_empty() {
            tracing::debug!(
                resource = %self.descriptor.name,
                hooks = hooks.body.len() + hooks.envelope.len(),
                "applying request hooks"
            );
        }
        let request = RequestEnvelope { url, headers, body };
        hooks.envelope.iter().try_fold(request, |request, hook| hook(request))
    }

    /// Run response hooks, decode, stage against the schema and derive the id.
    fn receive(&self, url: &str, sent: &WireValue, response: WireValue, policy: IdPolicy) -> Result<Received> {
        let hooks = &self.descriptor.response_hooks;
        if !hooks.body.is_empty() || !hooks.envelope.is_empty() {
            tracing::debug!(
                resource = %self.descriptor.name,
                hooks = hooks.body.len() + hooks.envelope.len(),
                "applying response hooks"
            );
        }
        let body = run_body_hooks(&hooks.body, response)?;
        let envelope = ResponseEnvelope {
            url: url.to_string(),
            body,
        };
        let envelope = hooks.envelope.iter().try_fold(envelope, |envelope, hook| hook(envelope))?;

        let extracted = match (policy, &self.descriptor.id_extractor) {
            (IdPolicy::Keep, _) | (_, None) => None,
            (_, Some(extract)) => extract(sent, &envelope.body),
        };
        let decoded = decode(envelope.body)?;
        let fields = stage(&self.descriptor.schema, &decoded.body)?;
        let id = extracted.or(decoded.id).filter(|id| !id.is_empty());
        Ok(Received { fields, id })
    }

    /// A singleton has no server-assigned id; it is identified by its path.
    fn singleton_fallback(&self, mut received: Received, path: &str) -> Received {
        if self.descriptor.singleton && received.id.is_none() {
            received.id = Some(path.to_string());
        }
        received
    }

    /// Write staged fields, then the id. Nothing is written when the id is required but missing.
    fn commit(&self, data: &mut dyn ResourceData, received: Received, policy: IdPolicy) -> Result<()> {
        if policy == IdPolicy::Require && received.id.is_none() {
            return Err(Error::BodyDecode(format!(
                "no identifier in {} response",
                self.descriptor.name
            )));
        }
        for (name, value) in received.fields {
            data.set(&name, value)?;
        }
        if policy != IdPolicy::Keep {
            if let Some(id) = received.id {
                data.set_id(id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use crate::client::HttpClient;
    use crate::data::MemoryResourceData;
    use crate::descriptor::path_from_field;
    use crate::schema::{FieldSchema, FieldSpec};
    use serde_json::json;

    fn ctx() -> ProviderContext {
        ProviderContext::new(
            "https://test.api",
            Arc::new(HttpClient::new()),
            Arc::new(StaticToken::new("t")),
        )
    }

    fn schema() -> FieldSchema {
        FieldSchema::new().field("issuer_id", FieldSpec::string().required())
    }

    #[test]
    fn instance_url_appends_id() {
        let service = CrudService::new(Arc::new(ResourceDescriptor::new("webhook", "/core/v1/webhooks", schema())));
        let data = MemoryResourceData::new(service.descriptor().schema.clone()).with_id("abc");
        assert_eq!(
            service.instance_url(&data, &ctx()).unwrap(),
            "https://test.api/core/v1/webhooks/abc"
        );
    }

    #[test]
    fn instance_url_without_id_fails() {
        let service = CrudService::new(Arc::new(ResourceDescriptor::new("webhook", "/core/v1/webhooks", schema())));
        let data = MemoryResourceData::new(service.descriptor().schema.clone());
        assert!(matches!(service.instance_url(&data, &ctx()), Err(Error::PathResolution(_))));
    }

    #[test]
    fn singleton_url_has_no_id() {
        let service = CrudService::new(Arc::new(
            ResourceDescriptor::new("custom_domain", "/core/v1/config/domain", schema()).singleton(),
        ));
        let data = MemoryResourceData::new(service.descriptor().schema.clone()).with_id("ignored");
        assert_eq!(
            service.instance_url(&data, &ctx()).unwrap(),
            "https://test.api/core/v1/config/domain"
        );
    }

    #[test]
    fn computed_path_feeds_instance_url() {
        let descriptor = ResourceDescriptor::with_path(
            "issuer_client",
            path_from_field("/ext/oidc/v1/issuers/{}/clients", "issuer_id"),
            schema(),
        );
        let service = CrudService::new(Arc::new(descriptor));
        let data = MemoryResourceData::from_json(service.descriptor().schema.clone(), json!({"issuer_id": "iss"}))
            .unwrap()
            .with_id("c1");
        assert_eq!(
            service.instance_url(&data, &ctx()).unwrap(),
            "https://test.api/ext/oidc/v1/issuers/iss/clients/c1"
        );
    }

    #[test]
    fn extractor_wins_over_hoisted_id() {
        let descriptor = ResourceDescriptor::new("did", "/core/v1/dids", schema())
            .id_extractor(|_, res| res.get("did").and_then(WireValue::as_str).map(String::from));
        let service = CrudService::new(Arc::new(descriptor));
        let response = WireValue::from(json!({"id": "hoisted", "did": "did:key:z6Mk"}));
        let received = service
            .receive("u", &WireValue::Null, response, IdPolicy::Require)
            .unwrap();
        assert_eq!(received.id.as_deref(), Some("did:key:z6Mk"));
    }

    #[test]
    fn commit_without_required_id_writes_nothing() {
        let service = CrudService::new(Arc::new(ResourceDescriptor::new("webhook", "/core/v1/webhooks", schema())));
        let mut data = MemoryResourceData::new(service.descriptor().schema.clone());
        let received = Received {
            fields: vec![("issuer_id".into(), WireValue::from("iss"))],
            id: None,
        };
        assert!(service.commit(&mut data, received, IdPolicy::Require).is_err());
        assert!(data.get("issuer_id").is_null());
        assert_eq!(data.id(), "");
    }
}
