//! Transcoding between configuration data and wire bodies.
//!
//! `encode` walks a schema and a `ResourceData` to build an outgoing body with camelCase keys,
//! dropping absent values. `decode` is schema-agnostic: it snake-cases every key of an incoming
//! body and hoists the top-level `id`. `apply` writes a decoded body back into a `ResourceData`,
//! conforming each value to the schema and ignoring keys the schema does not declare.

mod apply;
mod decode;
mod encode;

pub use apply::{apply, stage};
pub use decode::{decode, Decoded};
pub(crate) use decode::identifier;
pub use encode::encode;

use crate::schema::ValueKind;
use crate::value::WireValue;

/// Coerce a scalar to the declared kind. `None` when the value cannot be that kind.
pub(crate) fn coerce_scalar(kind: ValueKind, value: &WireValue) -> Option<WireValue> {
    match (kind, value) {
        (_, WireValue::Null) => Some(WireValue::Null),
        (ValueKind::Bool, WireValue::Bool(_)) => Some(value.clone()),
        (ValueKind::String, WireValue::String(_)) => Some(value.clone()),
        (ValueKind::Int, WireValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Some(WireValue::from(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Some(WireValue::from(f as i64))
                }
                _ => None,
            }
        }
        (ValueKind::Float, WireValue::Number(n)) => n.as_f64().map(WireValue::from_f64),
        _ => None,
    }
}

/// Deduplicate and sort set elements by their JSON text so encoding is deterministic.
pub(crate) fn canonical_set(items: Vec<WireValue>) -> Vec<WireValue> {
    let mut keyed: Vec<(String, WireValue)> = items
        .into_iter()
        .map(|v| (serde_json::to_string(&v).unwrap_or_default(), v))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);
    keyed.into_iter().map(|(_, v)| v).collect()
}
