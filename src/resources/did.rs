//! Decentralized identifiers. Immutable; the id is the DID string itself.

use crate::descriptor::ResourceDescriptor;
use crate::error::{Error, Result};
use crate::hooks::{nest, object};
use crate::schema::{FieldSchema, FieldSpec};
use crate::value::{WireMap, WireValue};

pub fn did() -> ResourceDescriptor {
    let key = FieldSchema::new()
        .field("did_document_key_id", FieldSpec::string().computed())
        .field("kms_key_id", FieldSpec::string().computed());
    let schema = FieldSchema::new()
        .field(
            "method",
            FieldSpec::string()
                .required()
                .force_replace()
                .describe("The method (or type) of did: key, web, or ion"),
        )
        .field(
            "url",
            FieldSpec::string()
                .optional()
                .force_replace()
                .describe("Domain or URL from which hostname will be extracted"),
        )
        .field("keys", FieldSpec::list_of_objects(key).computed());

    ResourceDescriptor::new("did", "/core/v1/dids", schema)
        .immutable()
        .request_body_hook(nest_options)
        .response_body_hook(lift_local_metadata)
}

/// `{method, url}` -> `{method, options: {url}}`.
fn nest_options(body: WireValue) -> Result<WireValue> {
    let mut body = object(body, "did request")?;
    nest(&mut body, "options", &[("url", "url")]);
    Ok(WireValue::Map(body))
}

/// Keep only the generated keys and the did itself, which becomes the resource id.
fn lift_local_metadata(body: WireValue) -> Result<WireValue> {
    let body = object(body, "did response")?;
    let metadata = match body.get("localMetadata") {
        Some(WireValue::Map(m)) => m,
        other => {
            return Err(Error::Hook(format!(
                "unexpected {} for did 'localMetadata'",
                other.map_or("missing value", WireValue::kind)
            )))
        }
    };

    let did = body
        .get("did")
        .and_then(WireValue::as_str)
        .filter(|did| !did.is_empty())
        .or_else(|| {
            metadata
                .get("initialDidDocument")
                .and_then(|doc| doc.get("id"))
                .and_then(WireValue::as_str)
        })
        .ok_or_else(|| Error::Hook("unable to determine did".into()))?;

    let mut out = WireMap::new();
    out.insert("id".into(), WireValue::from(did));
    if let Some(keys) = metadata.get("keys") {
        out.insert("keys".into(), keys.clone());
    }
    Ok(WireValue::Map(out))
}
