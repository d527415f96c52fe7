//! Web semantic credential configurations.

use crate::descriptor::ResourceDescriptor;
use crate::error::Result;
use crate::hooks::{keyed_map_to_list, list_to_keyed_map, nest, object, unnest};
use crate::schema::{FieldSchema, FieldSpec, ValueKind};
use crate::value::WireValue;

const ISSUER: &[(&str, &str)] = &[
    ("issuerName", "name"),
    ("issuerLogoUrl", "logoUrl"),
    ("issuerIconUrl", "iconUrl"),
];
const BRANDING: &[(&str, &str)] = &[
    ("backgroundColor", "backgroundColor"),
    ("watermarkImageUrl", "watermarkImageUrl"),
];
const EXPIRES_IN: &[&str] = &["years", "months", "weeks", "days", "hours", "minutes", "seconds"];

pub fn credential_config() -> ResourceDescriptor {
    let claim_mapping = FieldSchema::new()
        .field("name", FieldSpec::string().required())
        .field("map_from", FieldSpec::string().optional())
        .field("default_value", FieldSpec::string().optional())
        .field("required", FieldSpec::bool().optional());
    let mut schema = FieldSchema::new()
        .field("name", FieldSpec::string().required())
        .field("description", FieldSpec::string().optional())
        .field("type", FieldSpec::string().required())
        .field("additional_types", FieldSpec::list_of(ValueKind::String).optional())
        .field("contexts", FieldSpec::list_of(ValueKind::String).required())
        .field("issuer_name", FieldSpec::string().required())
        .field("issuer_logo_url", FieldSpec::string().required())
        .field("issuer_icon_url", FieldSpec::string().required())
        .field("proof_type", FieldSpec::string().optional())
        .field("background_color", FieldSpec::string().optional())
        .field("watermark_image_url", FieldSpec::string().optional())
        .field("claim_mapping", FieldSpec::set_of_objects(claim_mapping).required())
        .field("persist", FieldSpec::bool().optional())
        .field("revocable", FieldSpec::bool().optional())
        .field("include_id", FieldSpec::bool().computed())
        .field("claim_source_id", FieldSpec::string().optional());
    for unit in EXPIRES_IN {
        schema = schema.field(*unit, FieldSpec::int().optional());
    }

    ResourceDescriptor::new(
        "credential_config",
        "/core/v2/credentials/web-semantic/configurations",
        schema,
    )
    .request_body_hook(to_wire_shape)
    .response_body_hook(from_wire_shape)
}

fn same_names(keys: &[&'static str]) -> Vec<(&'static str, &'static str)> {
    keys.iter().map(|k| (*k, *k)).collect()
}

fn swapped(pairs: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    pairs.iter().map(|(outer, inner)| (*inner, *outer)).collect()
}

/// Issuer, branding and expiry move into objects; claim mappings are keyed by name.
fn to_wire_shape(body: WireValue) -> Result<WireValue> {
    let mut body = object(body, "credential configuration request")?;
    nest(&mut body, "issuer", ISSUER);
    nest(&mut body, "credentialBranding", BRANDING);
    nest(&mut body, "expiresIn", &same_names(EXPIRES_IN));
    list_to_keyed_map(&mut body, "claimMapping", "claimMappings", "name")?;
    Ok(WireValue::Map(body))
}

fn from_wire_shape(body: WireValue) -> Result<WireValue> {
    let mut body = object(body, "credential configuration response")?;
    unnest(&mut body, "issuer", &swapped(ISSUER))?;
    unnest(&mut body, "credentialBranding", &swapped(BRANDING))?;
    unnest(&mut body, "expiresIn", &same_names(EXPIRES_IN))?;
    keyed_map_to_list(&mut body, "claimMappings", "claimMapping", "name")?;
    Ok(WireValue::Map(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let body = json!({
            "name": "Course credential",
            "type": "CourseCredential",
            "issuerName": "Uni",
            "issuerLogoUrl": "https://uni.example.com/logo.png",
            "issuerIconUrl": "https://uni.example.com/icon.png",
            "backgroundColor": "#860012",
            "years": 1,
            "days": 5,
            "claimMapping": [{"name": "courseName", "mapFrom": "claims.course", "required": true}],
        });
        let out = to_wire_shape(WireValue::from(body)).unwrap();
        assert_eq!(
            serde_json::Value::from(out),
            json!({
                "name": "Course credential",
                "type": "CourseCredential",
                "issuer": {
                    "name": "Uni",
                    "logoUrl": "https://uni.example.com/logo.png",
                    "iconUrl": "https://uni.example.com/icon.png",
                },
                "credentialBranding": {"backgroundColor": "#860012"},
                "expiresIn": {"years": 1, "days": 5},
                "claimMappings": {"courseName": {"mapFrom": "claims.course", "required": true}},
            })
        );
    }

    #[test]
    fn response_shape() {
        let body = json!({
            "id": "cc-1",
            "issuer": {"name": "Uni", "logoUrl": "l", "iconUrl": "i"},
            "credentialBranding": {"watermarkImageUrl": "w"},
            "expiresIn": {"months": 6},
            "claimMappings": {"courseName": {"mapFrom": "claims.course"}},
            "includeId": false,
        });
        let out = from_wire_shape(WireValue::from(body)).unwrap();
        assert_eq!(
            serde_json::Value::from(out),
            json!({
                "id": "cc-1",
                "issuerName": "Uni",
                "issuerLogoUrl": "l",
                "issuerIconUrl": "i",
                "watermarkImageUrl": "w",
                "months": 6,
                "claimMapping": [{"name": "courseName", "mapFrom": "claims.course"}],
                "includeId": false,
            })
        );
    }

    #[test]
    fn omitted_expiry_sends_no_object() {
        let out = to_wire_shape(WireValue::from(json!({"name": "n"}))).unwrap();
        assert_eq!(serde_json::Value::from(out), json!({"name": "n"}));
    }
}
