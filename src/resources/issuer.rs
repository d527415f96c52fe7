//! OIDC bridge issuers and verifiers.
//!
//! An issuer is declared flat but sent as a `credential` and a `federatedProvider` object;
//! responses are flattened back. Its OpenID configuration url is derived from its id.

use crate::descriptor::ResourceDescriptor;
use crate::error::Result;
use crate::hooks::{flatten, nest, object, rename, wrap_scalar_in_list, ResponseEnvelope};
use crate::schema::{FieldSchema, FieldSpec, ValueKind};
use crate::value::WireValue;

pub fn issuer() -> ResourceDescriptor {
    let claim_mapping = FieldSchema::new()
        .field("json_ld_term", FieldSpec::string().required())
        .field("oidc_claim", FieldSpec::string().required());
    let schema = FieldSchema::new()
        .field("issuer_did", FieldSpec::string().required())
        .field("issuer_logo_url", FieldSpec::string().optional())
        .field("issuer_icon_url", FieldSpec::string().optional())
        .field("name", FieldSpec::string().optional())
        .field("issuer_name", FieldSpec::string().optional())
        .field("description", FieldSpec::string().optional())
        .field("context", FieldSpec::set_of(ValueKind::String).required())
        .field("type", FieldSpec::set_of(ValueKind::String).required())
        .field("proof_type", FieldSpec::string().optional())
        .field("background_color", FieldSpec::string().optional())
        .field("watermark_image_url", FieldSpec::string().optional())
        .field("url", FieldSpec::string().required().describe("Federated OIDC provider url"))
        .field("scope", FieldSpec::set_of(ValueKind::String).optional())
        .field("client_id", FieldSpec::string().required())
        .field("client_secret", FieldSpec::string().required())
        .field("token_endpoint_auth_method", FieldSpec::string().optional())
        .field("claims_source", FieldSpec::string().optional())
        .field("static_request_parameters", FieldSpec::map_of(ValueKind::String).optional())
        .field("forwarded_request_parameters", FieldSpec::set_of(ValueKind::String).optional())
        .field("claim_mappings", FieldSpec::list_of_objects(claim_mapping).required())
        .field("callback_url", FieldSpec::string().computed())
        .field("openid_configuration_url", FieldSpec::string().computed());

    ResourceDescriptor::new("issuer", "/ext/oidc/v1/issuers", schema)
        .request_body_hook(issuer_request)
        .response_body_hook(issuer_response)
        .response_hook(openid_configuration_url)
}

pub fn verifier() -> ResourceDescriptor {
    let claim_mapping = FieldSchema::new()
        .field("json_ld_fqn", FieldSpec::string().required())
        .field("oidc_claim", FieldSpec::string().required());
    let schema = FieldSchema::new()
        .field("verifier_did", FieldSpec::string().required())
        .field("presentation_template_id", FieldSpec::string().required())
        .field("claim_mapping", FieldSpec::list_of_objects(claim_mapping).required())
        .field("include_presentation", FieldSpec::bool().required());

    ResourceDescriptor::new("verifier", "/ext/oidc/v1/verifiers", schema)
        .request_body_hook(|body| renamed(body, "claimMapping", "claimMappings"))
        .response_body_hook(|body| renamed(body, "claimMappings", "claimMapping"))
}

fn issuer_request(body: WireValue) -> Result<WireValue> {
    let mut body = object(body, "issuer request")?;
    nest(
        &mut body,
        "credentialBranding",
        &[("backgroundColor", "backgroundColor"), ("watermarkImageUrl", "watermarkImageUrl")],
    );
    nest(
        &mut body,
        "credential",
        &[
            ("name", "name"),
            ("issuerDid", "issuerDid"),
            ("issuerName", "issuerName"),
            ("issuerLogoUrl", "issuerLogoUrl"),
            ("issuerIconUrl", "issuerIconUrl"),
            ("description", "description"),
            ("context", "context"),
            ("type", "type"),
            ("proofType", "proofType"),
            ("credentialBranding", "credentialBranding"),
        ],
    );
    nest(
        &mut body,
        "federatedProvider",
        &[
            ("url", "url"),
            ("scope", "scope"),
            ("clientId", "clientId"),
            ("clientSecret", "clientSecret"),
            ("tokenEndpointAuthMethod", "tokenEndpointAuthMethod"),
            ("claimsSource", "claimsSource"),
        ],
    );
    Ok(WireValue::Map(body))
}

/// Static request parameters are free-form and stay nested. The API answers `type` with a
/// single string.
fn issuer_response(body: WireValue) -> Result<WireValue> {
    let body = object(body, "issuer response")?;
    let mut body = flatten(body, &["staticRequestParameters"]);
    wrap_scalar_in_list(&mut body, "type");
    Ok(WireValue::Map(body))
}

/// `{issuers url}/{id}/.well-known/openid-configuration`, for every call that yields an id.
fn openid_configuration_url(mut envelope: ResponseEnvelope) -> Result<ResponseEnvelope> {
    let id = match envelope.body.get("id").and_then(WireValue::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Ok(envelope),
    };
    let suffix = format!("/{}", id);
    let base = envelope.url.strip_suffix(&suffix).unwrap_or(envelope.url.as_str());
    let url = format!("{}{}/.well-known/openid-configuration", base, suffix);
    if let Some(body) = envelope.body.as_map_mut() {
        body.insert("openidConfigurationUrl".into(), WireValue::from(url));
    }
    Ok(envelope)
}

fn renamed(body: WireValue, from: &str, to: &str) -> Result<WireValue> {
    let mut body = object(body, "verifier body")?;
    rename(&mut body, from, to);
    Ok(WireValue::Map(body))
}
