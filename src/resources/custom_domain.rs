//! The tenant's custom domain. A singleton identified by its domain name.

use crate::descriptor::ResourceDescriptor;
use crate::error::Result;
use crate::hooks::object;
use crate::schema::{FieldSchema, FieldSpec};
use crate::value::WireValue;

pub fn custom_domain() -> ResourceDescriptor {
    let schema = FieldSchema::new()
        .field("name", FieldSpec::string().required())
        .field("logo_url", FieldSpec::string().required())
        .field(
            "domain",
            FieldSpec::string()
                .required()
                .force_replace()
                .describe("Domain name, e.g. mattr.example.com"),
        )
        .field("homepage", FieldSpec::string().required())
        .field("verification_token", FieldSpec::string().computed())
        .field("is_verified", FieldSpec::bool().computed())
        .field("verified_at", FieldSpec::string().computed());

    ResourceDescriptor::new("custom_domain", "/core/v1/config/domain", schema)
        .singleton()
        .response_body_hook(domain_as_id)
}

fn domain_as_id(body: WireValue) -> Result<WireValue> {
    let mut body = object(body, "custom domain response")?;
    if let Some(domain) = body.get("domain").cloned() {
        body.insert("id".into(), domain);
    }
    Ok(WireValue::Map(body))
}
