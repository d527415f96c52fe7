//! Claim sources: external endpoints queried for claims during issuance.

use crate::descriptor::ResourceDescriptor;
use crate::error::Result;
use crate::hooks::{keyed_map_to_list, list_to_keyed_map, nest, object, unnest};
use crate::schema::{FieldSchema, FieldSpec};
use crate::value::WireValue;

pub fn claim_source() -> ResourceDescriptor {
    let parameter = FieldSchema::new()
        .field("property", FieldSpec::string().required())
        .field("map_from", FieldSpec::string().required())
        .field("default_value", FieldSpec::string().optional());
    let schema = FieldSchema::new()
        .field("name", FieldSpec::string().required())
        .field("url", FieldSpec::string().required())
        .field("authorization_type", FieldSpec::string().required())
        .field("authorization_value", FieldSpec::string().required())
        .field("request_parameter", FieldSpec::set_of_objects(parameter).required());

    ResourceDescriptor::new("claim_source", "/core/v1/claimsources", schema)
        .request_body_hook(to_wire_shape)
        .response_body_hook(from_wire_shape)
}

/// The API groups authorization into one object and keys request parameters by property.
fn to_wire_shape(body: WireValue) -> Result<WireValue> {
    let mut body = object(body, "claim source request")?;
    nest(
        &mut body,
        "authorization",
        &[("authorizationType", "type"), ("authorizationValue", "value")],
    );
    list_to_keyed_map(&mut body, "requestParameter", "requestParameters", "property")?;
    Ok(WireValue::Map(body))
}

fn from_wire_shape(body: WireValue) -> Result<WireValue> {
    let mut body = object(body, "claim source response")?;
    unnest(
        &mut body,
        "authorization",
        &[("type", "authorizationType"), ("value", "authorizationValue")],
    )?;
    keyed_map_to_list(&mut body, "requestParameters", "requestParameter", "property")?;
    Ok(WireValue::Map(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let body = json!({
            "name": "crm",
            "url": "https://crm.example.com/claims",
            "authorizationType": "api-key",
            "authorizationValue": "s3cr3t",
            "requestParameter": [{"property": "email", "mapFrom": "claims.email"}],
        });
        let out = to_wire_shape(WireValue::from(body)).unwrap();
        assert_eq!(
            serde_json::Value::from(out),
            json!({
                "name": "crm",
                "url": "https://crm.example.com/claims",
                "authorization": {"type": "api-key", "value": "s3cr3t"},
                "requestParameters": {"email": {"mapFrom": "claims.email"}},
            })
        );
    }

    #[test]
    fn response_shape() {
        let body = json!({
            "id": "cs-1",
            "authorization": {"type": "api-key", "value": "s3cr3t"},
            "requestParameters": {"email": {"mapFrom": "claims.email", "defaultValue": "n/a"}},
        });
        let out = from_wire_shape(WireValue::from(body)).unwrap();
        assert_eq!(
            serde_json::Value::from(out),
            json!({
                "id": "cs-1",
                "authorizationType": "api-key",
                "authorizationValue": "s3cr3t",
                "requestParameter": [{"property": "email", "mapFrom": "claims.email", "defaultValue": "n/a"}],
            })
        );
    }
}
