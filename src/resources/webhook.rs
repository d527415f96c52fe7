//! Webhooks subscribed to platform events.

use crate::descriptor::ResourceDescriptor;
use crate::schema::{FieldSchema, FieldSpec, ValueKind};

pub fn webhook() -> ResourceDescriptor {
    let schema = FieldSchema::new()
        .field(
            "events",
            FieldSpec::list_of(ValueKind::String)
                .required()
                .describe("Types of events we will look out for and send to the webhook"),
        )
        .field(
            "url",
            FieldSpec::string()
                .required()
                .describe("URL of the webhook, to which event payloads are delivered"),
        )
        .field(
            "disabled",
            FieldSpec::bool().optional().describe("If true, the webhook is disabled"),
        );
    ResourceDescriptor::new("webhook", "/core/v1/webhooks", schema)
}
