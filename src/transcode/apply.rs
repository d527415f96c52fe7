//! Staging decoded response fields against the schema and writing them to resource data.

use crate::data::ResourceData;
use crate::error::{Error, Result};
use crate::schema::{Cardinality, FieldSchema, FieldSpec};
use crate::transcode::{canonical_set, coerce_scalar};
use crate::value::{WireMap, WireValue};

/// Conform a decoded body to the schema without touching any `ResourceData`.
/// Keys the schema does not declare are skipped.
pub fn stage(schema: &FieldSchema, decoded: &WireValue) -> Result<Vec<(String, WireValue)>> {
    let fields = match decoded {
        WireValue::Null => return Ok(Vec::new()),
        WireValue::Map(m) => m,
        other => {
            return Err(Error::BodyDecode(format!(
                "expected an object body, got {}",
                other.kind()
            )))
        }
    };
    let mut staged = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let Some(spec) = schema.get(name) else {
            tracing::debug!(field = %name, "skipping field absent from schema");
            continue;
        };
        staged.push((name.clone(), conform(spec, value, name)?));
    }
    Ok(staged)
}

/// Write a decoded body into the resource data, field by field.
pub fn apply(schema: &FieldSchema, decoded: &WireValue, data: &mut dyn ResourceData) -> Result<()> {
    for (name, value) in stage(schema, decoded)? {
        data.set(&name, value)?;
    }
    Ok(())
}

fn conform(spec: &FieldSpec, value: &WireValue, path: &str) -> Result<WireValue> {
    if value.is_null() {
        return Ok(WireValue::Null);
    }
    match spec.cardinality {
        Cardinality::Scalar => coerce_scalar(spec.value_kind, value)
            .ok_or_else(|| unexpected(path, &spec.shape(), value)),
        Cardinality::List | Cardinality::Set => {
            let items = value
                .as_list()
                .ok_or_else(|| unexpected(path, &spec.shape(), value))?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                let conformed = match &spec.element {
                    Some(element) => conform_object(element, item, &item_path)?,
                    None => coerce_scalar(spec.value_kind, item)
                        .ok_or_else(|| unexpected(&item_path, &spec.value_kind.to_string(), item))?,
                };
                out.push(conformed);
            }
            if spec.cardinality == Cardinality::Set {
                out = canonical_set(out);
            }
            Ok(WireValue::List(out))
        }
        Cardinality::Map => match &spec.element {
            Some(element) => conform_object(element, value, path),
            None => {
                let entries = value
                    .as_map()
                    .ok_or_else(|| unexpected(path, &spec.shape(), value))?;
                let mut out = WireMap::new();
                for (key, entry) in entries {
                    let entry_path = format!("{}.{}", path, key);
                    let conformed = coerce_scalar(spec.value_kind, entry)
                        .ok_or_else(|| unexpected(&entry_path, &spec.value_kind.to_string(), entry))?;
                    out.insert(key.clone(), conformed);
                }
                Ok(WireValue::Map(out))
            }
        },
    }
}

fn conform_object(schema: &FieldSchema, value: &WireValue, path: &str) -> Result<WireValue> {
    let fields = match value {
        WireValue::Null => return Ok(WireValue::Null),
        WireValue::Map(m) => m,
        other => return Err(unexpected(path, "object", other)),
    };
    let mut out = WireMap::new();
    for (name, v) in fields {
        if let Some(spec) = schema.get(name) {
            let conformed = conform(spec, v, &format!("{}.{}", path, name))?;
            if !conformed.is_null() {
                out.insert(name.clone(), conformed);
            }
        }
    }
    Ok(WireValue::Map(out))
}

fn unexpected(path: &str, expected: &str, got: &WireValue) -> Error {
    Error::BodyDecode(format!(
        "field '{}': expected {}, got {}",
        path,
        expected,
        got.kind()
    ))
}
