//! Schema-driven encoding of resource data into a camelCase request body.

use crate::case::to_camel_case;
use crate::data::ResourceData;
use crate::error::{Error, Result};
use crate::schema::{Cardinality, FieldSchema, FieldSpec};
use crate::transcode::{canonical_set, coerce_scalar};
use crate::value::{WireMap, WireValue};

/// Build the outgoing body for a resource instance. Computed fields are never read.
pub fn encode(schema: &FieldSchema, data: &dyn ResourceData) -> Result<WireValue> {
    let mut body = WireMap::new();
    for (name, spec) in schema.iter() {
        if spec.is_computed() {
            continue;
        }
        let encoded = encode_field(spec, &data.get(name), name)?;
        if !encoded.is_absent() {
            body.insert(to_camel_case(name), encoded);
        }
    }
    Ok(WireValue::Map(body))
}

fn encode_nested(schema: &FieldSchema, value: &WireValue, path: &str) -> Result<WireValue> {
    let fields = match value {
        WireValue::Null => return Ok(WireValue::Null),
        WireValue::Map(m) => m,
        other => return Err(mismatch(path, "object", other)),
    };
    let mut out = WireMap::new();
    for (name, spec) in schema.iter() {
        if spec.is_computed() {
            continue;
        }
        let field_path = join(path, name);
        let raw = fields.get(name).cloned().unwrap_or_default();
        let encoded = encode_field(spec, &raw, &field_path)?;
        if !encoded.is_absent() {
            out.insert(to_camel_case(name), encoded);
        }
    }
    Ok(WireValue::Map(out))
}

fn encode_field(spec: &FieldSpec, value: &WireValue, path: &str) -> Result<WireValue> {
    if value.is_null() {
        return Ok(WireValue::Null);
    }
    match spec.cardinality {
        Cardinality::Scalar => coerce_scalar(spec.value_kind, value)
            .ok_or_else(|| mismatch(path, &spec.shape(), value)),
        Cardinality::List | Cardinality::Set => {
            let items = value
                .as_list()
                .ok_or_else(|| mismatch(path, &spec.shape(), value))?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                out.push(encode_element(spec, item, &item_path)?);
            }
            if out.is_empty() {
                return Ok(WireValue::Null);
            }
            if spec.cardinality == Cardinality::Set {
                out = canonical_set(out);
            }
            Ok(WireValue::List(out))
        }
        Cardinality::Map => match &spec.element {
            Some(element) => encode_nested(element, value, path),
            None => {
                let entries = value
                    .as_map()
                    .ok_or_else(|| mismatch(path, &spec.shape(), value))?;
                let mut out = WireMap::new();
                for (key, entry) in entries {
                    let encoded = coerce_scalar(spec.value_kind, entry)
                        .ok_or_else(|| mismatch(&join(path, key), &spec.value_kind.to_string(), entry))?;
                    if !encoded.is_absent() {
                        out.insert(to_camel_case(key), encoded);
                    }
                }
                Ok(WireValue::Map(out))
            }
        },
    }
}

fn encode_element(spec: &FieldSpec, item: &WireValue, path: &str) -> Result<WireValue> {
    match &spec.element {
        Some(element) => encode_nested(element, item, path),
        None => coerce_scalar(spec.value_kind, item)
            .ok_or_else(|| mismatch(path, &spec.value_kind.to_string(), item)),
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn mismatch(path: &str, expected: &str, got: &WireValue) -> Error {
    Error::TypeMismatch {
        field: path.to_string(),
        expected: expected.to_string(),
        got: got.kind().to_string(),
    }
}
