//! MATTR resource declarations: schema, path and hooks for each resource type.

mod claim_source;
mod client;
mod credential_config;
mod custom_domain;
mod did;
mod issuer;
mod webhook;

pub use claim_source::claim_source;
pub use client::{issuer_client, verifier_client};
pub use credential_config::credential_config;
pub use custom_domain::custom_domain;
pub use did::did;
pub use issuer::{issuer, verifier};
pub use webhook::webhook;
