//! OIDC clients registered under an issuer or a verifier. The parent id is part of the path,
//! not the body.

use crate::descriptor::{path_from_field, ResourceDescriptor};
use crate::error::Result;
use crate::hooks::{object, remove};
use crate::schema::{FieldSchema, FieldSpec, ValueKind};
use crate::value::WireValue;

pub fn issuer_client() -> ResourceDescriptor {
    let schema = FieldSchema::new()
        .field("issuer_id", FieldSpec::string().required().force_replace())
        .field("name", FieldSpec::string().required())
        .field("redirect_uris", FieldSpec::set_of(ValueKind::String).required())
        .field("response_types", FieldSpec::set_of(ValueKind::String).optional())
        .field("grant_types", FieldSpec::set_of(ValueKind::String).optional())
        .field("token_endpoint_auth_method", FieldSpec::string().optional())
        .field("id_token_signed_response_alg", FieldSpec::string().required())
        .field("application_type", FieldSpec::string().required());

    ResourceDescriptor::with_path(
        "issuer_client",
        path_from_field("/ext/oidc/v1/issuers/{}/clients", "issuer_id"),
        schema,
    )
    .request_body_hook(|body| without(body, "issuerId"))
}

pub fn verifier_client() -> ResourceDescriptor {
    let schema = FieldSchema::new()
        .field("verifier_id", FieldSpec::string().required().force_replace())
        .field("name", FieldSpec::string().required())
        .field("redirect_uris", FieldSpec::list_of(ValueKind::String).required())
        .field("response_types", FieldSpec::list_of(ValueKind::String).optional())
        .field("grant_types", FieldSpec::list_of(ValueKind::String).optional())
        .field("token_endpoint_auth_method", FieldSpec::string().optional())
        .field("id_token_signed_response_alg", FieldSpec::string().required())
        .field("application_type", FieldSpec::string().optional())
        .field("logo_uri", FieldSpec::string().optional())
        .field("secret", FieldSpec::string().computed())
        .field("openid_configuration_url", FieldSpec::string().computed())
        .field("authorization_url", FieldSpec::string().computed());

    ResourceDescriptor::with_path(
        "verifier_client",
        path_from_field("/ext/oidc/v1/verifiers/{}/clients", "verifier_id"),
        schema,
    )
    .request_body_hook(|body| without(body, "verifierId"))
}

fn without(body: WireValue, key: &str) -> Result<WireValue> {
    let mut body = object(body, "client request")?;
    remove(&mut body, &[key]);
    Ok(WireValue::Map(body))
}
