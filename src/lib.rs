//! MATTR provider core: schema-driven transcoding and CRUD orchestration for MATTR
//! identity-platform resources.

pub mod auth;
pub mod case;
pub mod client;
pub mod config;
pub mod data;
pub mod descriptor;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod service;
pub mod state;
pub mod transcode;
pub mod value;

pub use auth::{StaticToken, TokenProvider};
pub use client::{Client, Headers, HttpClient};
pub use config::ProviderConfig;
pub use data::{MemoryResourceData, ResourceData};
pub use descriptor::{path_from_field, ResourceDescriptor, ResourcePath};
pub use error::{ConfigError, Error, Method, Result};
pub use logging::init_logging;
pub use provider::{Operation, Provider, Resource};
pub use schema::{validate_schema, Cardinality, FieldSchema, FieldSpec, Mutability, ValueKind};
pub use service::CrudService;
pub use state::ProviderContext;
pub use transcode::{decode, encode, Decoded};
pub use value::{WireMap, WireValue};
