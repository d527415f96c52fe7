mod common;

use common::{context, StubClient};
use mattr_provider::{Error, MemoryResourceData, Method, Provider, ResourceData};
use serde_json::{json, Value};

fn data_for(provider: &Provider, name: &str, values: Value) -> MemoryResourceData {
    let schema = provider.resource(name).unwrap().schema.clone();
    MemoryResourceData::from_json(schema, values).unwrap()
}

fn sorted_by_property(value: &Value) -> Vec<Value> {
    let mut items = value.as_array().cloned().unwrap_or_default();
    items.sort_by_key(|item| item["property"].as_str().unwrap_or_default().to_string());
    items
}

#[tokio::test]
async fn claim_source_request_parameters_round_trip() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let parameters = json!([
        {"property": "email", "map_from": "claims.email"},
        {"property": "age", "map_from": "claims.age", "default_value": "18"},
    ]);
    let mut data = data_for(
        &provider,
        "mattr_claim_source",
        json!({
            "name": "crm",
            "url": "https://crm.example.com/claims",
            "authorization_type": "api-key",
            "authorization_value": "s3cr3t",
            "request_parameter": parameters,
        }),
    );
    stub.reply(
        Method::Post,
        "/core/v1/claimsources",
        json!({
            "id": "cs-1",
            "name": "crm",
            "url": "https://crm.example.com/claims",
            "authorization": {"type": "api-key", "value": "s3cr3t"},
            "requestParameters": {
                "email": {"mapFrom": "claims.email"},
                "age": {"mapFrom": "claims.age", "defaultValue": "18"},
            },
        }),
    );

    provider.create("mattr_claim_source", &mut data, &ctx).await.unwrap();

    let sent = stub.last_body();
    assert_eq!(sent["authorization"], json!({"type": "api-key", "value": "s3cr3t"}));
    assert_eq!(
        sent["requestParameters"],
        json!({
            "email": {"mapFrom": "claims.email"},
            "age": {"mapFrom": "claims.age", "defaultValue": "18"},
        })
    );
    assert!(sent.get("requestParameter").is_none());
    assert!(sent.get("authorizationType").is_none());

    assert_eq!(data.id(), "cs-1");
    let state = data.to_json();
    assert_eq!(state["authorization_type"], json!("api-key"));
    assert_eq!(state["authorization_value"], json!("s3cr3t"));
    assert_eq!(
        sorted_by_property(&state["request_parameter"]),
        sorted_by_property(&parameters)
    );
}

#[tokio::test]
async fn did_create_nests_options_and_takes_did_as_id() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mut data = data_for(&provider, "mattr_did", json!({"method": "web", "url": "example.com"}));
    stub.reply(
        Method::Post,
        "/core/v1/dids",
        json!({
            "did": "did:web:example.com",
            "registrationStatus": "COMPLETED",
            "localMetadata": {
                "keys": [{"didDocumentKeyId": "did:web:example.com#z6Mk", "kmsKeyId": "kms-1"}],
                "registered": 1650000000,
            },
        }),
    );

    provider.create("mattr_did", &mut data, &ctx).await.unwrap();

    assert_eq!(stub.last_body(), json!({"method": "web", "options": {"url": "example.com"}}));
    assert_eq!(data.id(), "did:web:example.com");
    assert_eq!(
        data.to_json()["keys"],
        json!([{"did_document_key_id": "did:web:example.com#z6Mk", "kms_key_id": "kms-1"}])
    );
    assert_eq!(data.get("method").as_str(), Some("web"));
}

#[tokio::test]
async fn immutable_did_has_no_update() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    assert!(provider.resource("mattr_did").unwrap().update.is_none());

    let mut data = data_for(&provider, "mattr_did", json!({"method": "key"})).with_id("did:key:z6Mk");
    let err = provider.update("mattr_did", &mut data, &ctx).await.unwrap_err();

    assert!(matches!(err, Error::UnsupportedOperation { operation: "update", .. }));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn issuer_client_path_comes_from_issuer_id() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mut data = data_for(
        &provider,
        "mattr_issuer_client",
        json!({
            "issuer_id": "iss-1",
            "name": "portal",
            "redirect_uris": ["https://portal.example.com/cb"],
            "id_token_signed_response_alg": "ES256",
            "application_type": "web",
        }),
    );
    stub.reply(
        Method::Post,
        "/ext/oidc/v1/issuers/iss-1/clients",
        json!({"id": "client-1", "name": "portal", "redirectUris": ["https://portal.example.com/cb"]}),
    );

    provider.create("mattr_issuer_client", &mut data, &ctx).await.unwrap();

    let sent = stub.last_body();
    assert!(sent.get("issuerId").is_none());
    assert_eq!(sent["idTokenSignedResponseAlg"], json!("ES256"));
    assert_eq!(data.id(), "client-1");
    assert_eq!(data.get("issuer_id").as_str(), Some("iss-1"));
    assert_eq!(
        stub.requests()[0].url,
        "https://test.api/ext/oidc/v1/issuers/iss-1/clients"
    );
}

#[tokio::test]
async fn missing_parent_id_fails_before_any_request() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mut data = data_for(&provider, "mattr_issuer_client", json!({"name": "portal"}));

    let err = provider.create("mattr_issuer_client", &mut data, &ctx).await.unwrap_err();

    assert!(matches!(err, Error::PathResolution(_)));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn verifier_client_records_computed_secret() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mut data = data_for(
        &provider,
        "mattr_verifier_client",
        json!({
            "verifier_id": "ver-1",
            "name": "gate",
            "redirect_uris": ["https://gate.example.com/cb"],
            "id_token_signed_response_alg": "ES256",
        }),
    )
    .with_id("vc-1");
    stub.reply(
        Method::Get,
        "/ext/oidc/v1/verifiers/ver-1/clients/vc-1",
        json!({
            "id": "vc-1",
            "name": "gate",
            "secret": "hunter2",
            "openidConfigurationUrl": "https://test.api/ext/oidc/v1/verifiers/ver-1/.well-known/openid-configuration",
        }),
    );

    provider.read("mattr_verifier_client", &mut data, &ctx).await.unwrap();

    assert_eq!(data.get("secret").as_str(), Some("hunter2"));
    assert!(data
        .get("openid_configuration_url")
        .as_str()
        .is_some_and(|url| url.ends_with("openid-configuration")));
}

#[tokio::test]
async fn custom_domain_is_a_singleton_keyed_by_domain() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mut data = data_for(
        &provider,
        "mattr_custom_domain",
        json!({
            "name": "Example",
            "logo_url": "https://example.com/logo.png",
            "domain": "mattr.example.com",
            "homepage": "https://example.com",
        }),
    );
    let answer = json!({
        "name": "Example",
        "logoUrl": "https://example.com/logo.png",
        "domain": "mattr.example.com",
        "homepage": "https://example.com",
        "verificationToken": "tok-123",
        "isVerified": false,
    });
    stub.reply(Method::Post, "/core/v1/config/domain", answer.clone());
    stub.reply(Method::Get, "/core/v1/config/domain", answer);

    provider.create("mattr_custom_domain", &mut data, &ctx).await.unwrap();
    provider.read("mattr_custom_domain", &mut data, &ctx).await.unwrap();

    assert_eq!(data.id(), "mattr.example.com");
    assert_eq!(data.get("verification_token").as_str(), Some("tok-123"));
    assert_eq!(data.get("is_verified").as_bool(), Some(false));
    let urls: Vec<_> = stub.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://test.api/core/v1/config/domain",
            "https://test.api/core/v1/config/domain",
        ]
    );
}

#[tokio::test]
async fn issuer_create_groups_request_and_flattens_response() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mut data = data_for(
        &provider,
        "mattr_issuer",
        json!({
            "issuer_did": "did:web:example.com",
            "name": "Employee",
            "context": ["https://schema.org"],
            "type": ["EmployeeCredential"],
            "background_color": "#003366",
            "url": "https://idp.example.com",
            "client_id": "cid",
            "client_secret": "secret",
            "static_request_parameters": {"prompt": "login"},
            "claim_mappings": [{"json_ld_term": "email", "oidc_claim": "email"}],
        }),
    );
    stub.reply(
        Method::Post,
        "/ext/oidc/v1/issuers",
        json!({
            "id": "iss-1",
            "credential": {
                "issuerDid": "did:web:example.com",
                "name": "Employee",
                "context": ["https://schema.org"],
                "type": "EmployeeCredential",
                "credentialBranding": {"backgroundColor": "#003366"},
            },
            "federatedProvider": {"url": "https://idp.example.com", "clientId": "cid", "clientSecret": "secret"},
            "staticRequestParameters": {"prompt": "login"},
            "claimMappings": [{"jsonLdTerm": "email", "oidcClaim": "email"}],
            "callbackUrl": "https://test.api/ext/oidc/v1/issuers/iss-1/federated/callback",
        }),
    );

    provider.create("mattr_issuer", &mut data, &ctx).await.unwrap();

    let sent = stub.last_body();
    assert_eq!(sent["credential"]["issuerDid"], json!("did:web:example.com"));
    assert_eq!(sent["credential"]["credentialBranding"], json!({"backgroundColor": "#003366"}));
    assert_eq!(sent["federatedProvider"]["clientId"], json!("cid"));
    assert!(sent.get("issuerDid").is_none());
    assert!(sent.get("url").is_none());

    assert_eq!(data.id(), "iss-1");
    let state = data.to_json();
    assert_eq!(state["type"], json!(["EmployeeCredential"]));
    assert_eq!(state["background_color"], json!("#003366"));
    assert_eq!(state["client_id"], json!("cid"));
    assert_eq!(state["static_request_parameters"], json!({"prompt": "login"}));
    assert_eq!(
        state["openid_configuration_url"],
        json!("https://test.api/ext/oidc/v1/issuers/iss-1/.well-known/openid-configuration")
    );
    assert_eq!(
        state["callback_url"],
        json!("https://test.api/ext/oidc/v1/issuers/iss-1/federated/callback")
    );
}

#[tokio::test]
async fn verifier_claim_mapping_uses_plural_wire_key() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mapping = json!([{"json_ld_fqn": "https://schema.org/email", "oidc_claim": "email"}]);
    let mut data = data_for(
        &provider,
        "mattr_verifier",
        json!({
            "verifier_did": "did:web:example.com",
            "presentation_template_id": "pt-1",
            "claim_mapping": mapping,
            "include_presentation": true,
        }),
    )
    .with_id("ver-1");
    stub.reply(
        Method::Put,
        "/ext/oidc/v1/verifiers/ver-1",
        json!({
            "id": "ver-1",
            "verifierDid": "did:web:example.com",
            "presentationTemplateId": "pt-1",
            "claimMappings": [{"jsonLdFqn": "https://schema.org/email", "oidcClaim": "email"}],
            "includePresentation": true,
        }),
    );

    provider.update("mattr_verifier", &mut data, &ctx).await.unwrap();

    let sent = stub.last_body();
    assert_eq!(
        sent["claimMappings"],
        json!([{"jsonLdFqn": "https://schema.org/email", "oidcClaim": "email"}])
    );
    assert!(sent.get("claimMapping").is_none());
    assert_eq!(data.to_json()["claim_mapping"], mapping);
}

#[tokio::test]
async fn credential_config_reshapes_issuer_branding_expiry_and_claims() {
    let stub = StubClient::new();
    let ctx = context(stub.clone());
    let provider = Provider::mattr().unwrap();
    let mut data = data_for(
        &provider,
        "mattr_credential_web",
        json!({
            "name": "Course credential",
            "type": "CourseCredential",
            "contexts": ["https://schema.org"],
            "issuer_name": "Uni",
            "issuer_logo_url": "https://uni.example.com/logo.png",
            "issuer_icon_url": "https://uni.example.com/icon.png",
            "background_color": "#860012",
            "claim_mapping": [{"name": "courseName", "map_from": "claims.course", "required": true}],
            "months": 6,
        }),
    );
    stub.reply(
        Method::Post,
        "/core/v2/credentials/web-semantic/configurations",
        json!({
            "id": "cc-1",
            "name": "Course credential",
            "type": "CourseCredential",
            "contexts": ["https://schema.org"],
            "issuer": {
                "name": "Uni",
                "logoUrl": "https://uni.example.com/logo.png",
                "iconUrl": "https://uni.example.com/icon.png",
            },
            "credentialBranding": {"backgroundColor": "#860012"},
            "claimMappings": {"courseName": {"mapFrom": "claims.course", "required": true}},
            "expiresIn": {"months": 6},
            "includeId": false,
        }),
    );

    provider.create("mattr_credential_web", &mut data, &ctx).await.unwrap();

    let sent = stub.last_body();
    assert_eq!(sent["issuer"]["logoUrl"], json!("https://uni.example.com/logo.png"));
    assert_eq!(sent["credentialBranding"], json!({"backgroundColor": "#860012"}));
    assert_eq!(sent["expiresIn"], json!({"months": 6}));
    assert_eq!(
        sent["claimMappings"],
        json!({"courseName": {"mapFrom": "claims.course", "required": true}})
    );
    assert!(sent.get("months").is_none());

    assert_eq!(data.id(), "cc-1");
    let state = data.to_json();
    assert_eq!(state["issuer_name"], json!("Uni"));
    assert_eq!(state["background_color"], json!("#860012"));
    assert_eq!(state["months"], json!(6));
    assert_eq!(state["include_id"], json!(false));
    assert_eq!(
        state["claim_mapping"],
        json!([{"name": "courseName", "map_from": "claims.course", "required": true}])
    );
}
