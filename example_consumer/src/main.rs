//! Example consumer: reads one MATTR resource and prints its state.
//!
//! Run from repo root: `cargo run -p example-consumer -- mattr_webhook <id>`
//! Settings come from `MATTR_API_URL` / `MATTR_ACCESS_TOKEN` (a `.env` file works too).

use mattr_provider::{init_logging, MemoryResourceData, Provider, ProviderConfig, ResourceData};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging("mattr_provider=info");

    let mut args = std::env::args().skip(1);
    let (Some(resource_type), Some(id)) = (args.next(), args.next()) else {
        let provider = Provider::mattr()?;
        let names: Vec<_> = provider.resource_names().collect();
        eprintln!("usage: example-consumer <{}> <id>", names.join("|"));
        std::process::exit(2);
    };

    let ctx = ProviderConfig::from_env()?.into_context()?;
    let provider = Provider::mattr()?;
    let schema = provider
        .resource(&resource_type)
        .ok_or_else(|| mattr_provider::Error::UnknownResource(resource_type.clone()))?
        .schema
        .clone();

    let mut data = MemoryResourceData::new(schema).with_id(id);
    provider.read(&resource_type, &mut data, &ctx).await?;
    tracing::info!(resource = %resource_type, id = %data.id(), "fetched");
    println!("{}", serde_json::to_string_pretty(&data.to_json())?);
    Ok(())
}
