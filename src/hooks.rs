//! Hooks: pure transforms that reshape bodies between transcoding and the network call.
//!
//! Request hooks see the encoded body with camelCase keys; response hooks see the raw
//! response body before decoding. Helpers below cover the reshapes vendor APIs need.

use crate::client::Headers;
use crate::error::{Error, Result};
use crate::value::{WireMap, WireValue};
use std::sync::Arc;

/// Outgoing request as seen by request envelope hooks.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestEnvelope {
    pub url: String,
    pub headers: Headers,
    pub body: WireValue,
}

/// Incoming response as seen by response envelope hooks.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
    pub url: String,
    pub body: WireValue,
}

pub type BodyHook = Arc<dyn Fn(WireValue) -> Result<WireValue> + Send + Sync>;
pub type RequestHook = Arc<dyn Fn(RequestEnvelope) -> Result<RequestEnvelope> + Send + Sync>;
pub type ResponseHook = Arc<dyn Fn(ResponseEnvelope) -> Result<ResponseEnvelope> + Send + Sync>;
/// Derives the resource id from (request body, response body after hooks).
pub type IdExtractor = Arc<dyn Fn(&WireValue, &WireValue) -> Option<String> + Send + Sync>;

pub fn body_hook<F>(f: F) -> BodyHook
where
    F: Fn(WireValue) -> Result<WireValue> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Run body hooks in order, stopping at the first error.
pub fn run_body_hooks(hooks: &[BodyHook], body: WireValue) -> Result<WireValue> {
    hooks.iter().try_fold(body, |body, hook| hook(body))
}

/// Expect an object body.
pub fn object(body: WireValue, context: &str) -> Result<WireMap> {
    match body {
        WireValue::Map(m) => Ok(m),
        other => Err(Error::Hook(format!(
            "unexpected {} body for {}",
            other.kind(),
            context
        ))),
    }
}

pub fn rename(map: &mut WireMap, from: &str, to: &str) {
    if let Some(v) = map.remove(from) {
        map.insert(to.to_string(), v);
    }
}

pub fn remove(map: &mut WireMap, keys: &[&str]) {
    for key in keys {
        map.remove(*key);
    }
}

/// Move top-level keys into a nested object, renaming each: `(outer_key, inner_key)`.
/// Nothing is inserted when none of the keys are present.
pub fn nest(map: &mut WireMap, into: &str, fields: &[(&str, &str)]) {
    let mut nested = match map.remove(into) {
        Some(WireValue::Map(m)) => m,
        _ => WireMap::new(),
    };
    for (outer, inner) in fields {
        if let Some(v) = map.remove(*outer) {
            nested.insert(inner.to_string(), v);
        }
    }
    if !nested.is_empty() {
        map.insert(into.to_string(), WireValue::Map(nested));
    }
}

/// Reverse of [`nest`]: lift `(inner_key, outer_key)` pairs out of a nested object and drop it.
pub fn unnest(map: &mut WireMap, from: &str, fields: &[(&str, &str)]) -> Result<()> {
    let nested = match map.remove(from) {
        None | Some(WireValue::Null) => return Ok(()),
        Some(WireValue::Map(m)) => m,
        Some(other) => {
            return Err(Error::Hook(format!(
                "expected '{}' to be an object, got {}",
                from,
                other.kind()
            )))
        }
    };
    for (inner, outer) in fields {
        if let Some(v) = nested.get(*inner) {
            map.insert(outer.to_string(), v.clone());
        }
    }
    Ok(())
}

/// Turn a list of objects into an object keyed by each element's `key_field`, which is removed
/// from the element.
pub fn list_to_keyed_map(map: &mut WireMap, list_key: &str, map_key: &str, key_field: &str) -> Result<()> {
    let items = match map.remove(list_key) {
        None | Some(WireValue::Null) => return Ok(()),
        Some(WireValue::List(items)) => items,
        Some(other) => {
            return Err(Error::Hook(format!(
                "expected '{}' to be a list, got {}",
                list_key,
                other.kind()
            )))
        }
    };
    let mut keyed = WireMap::new();
    for (i, item) in items.into_iter().enumerate() {
        let mut element = match item {
            WireValue::Map(m) => m,
            other => {
                return Err(Error::Hook(format!(
                    "expected '{}[{}]' to be an object, got {}",
                    list_key,
                    i,
                    other.kind()
                )))
            }
        };
        let key = match element.remove(key_field) {
            Some(WireValue::String(s)) if !s.is_empty() => s,
            _ => {
                return Err(Error::Hook(format!(
                    "'{}[{}]' is missing string field '{}'",
                    list_key, i, key_field
                )))
            }
        };
        keyed.insert(key, WireValue::Map(element));
    }
    map.insert(map_key.to_string(), WireValue::Map(keyed));
    Ok(())
}

/// Reverse of [`list_to_keyed_map`]: each entry becomes an object with its key stored under
/// `key_field`. The list follows key order.
pub fn keyed_map_to_list(map: &mut WireMap, map_key: &str, list_key: &str, key_field: &str) -> Result<()> {
    let keyed = match map.remove(map_key) {
        None | Some(WireValue::Null) => return Ok(()),
        Some(WireValue::Map(m)) => m,
        Some(other) => {
            return Err(Error::Hook(format!(
                "expected '{}' to be an object, got {}",
                map_key,
                other.kind()
            )))
        }
    };
    let mut items = Vec::with_capacity(keyed.len());
    for (key, entry) in keyed {
        let mut element = match entry {
            WireValue::Map(m) => m,
            other => {
                return Err(Error::Hook(format!(
                    "expected '{}.{}' to be an object, got {}",
                    map_key,
                    key,
                    other.kind()
                )))
            }
        };
        element.insert(key_field.to_string(), WireValue::String(key));
        items.push(WireValue::Map(element));
    }
    map.insert(list_key.to_string(), WireValue::List(items));
    Ok(())
}

/// Wrap a scalar in a one-element list, for APIs that answer a list field with a single value.
pub fn wrap_scalar_in_list(map: &mut WireMap, key: &str) {
    if let Some(v) = map.get_mut(key) {
        if !matches!(v, WireValue::List(_) | WireValue::Map(_) | WireValue::Null) {
            let scalar = std::mem::take(v);
            *v = WireValue::List(vec![scalar]);
        }
    }
}

/// Merge nested objects into the top level, recursively. Keys in `keep` are left nested.
/// On collision the deeper value wins.
pub fn flatten(map: WireMap, keep: &[&str]) -> WireMap {
    let mut out = WireMap::new();
    for (key, value) in map {
        match value {
            WireValue::Map(nested) if !keep.contains(&key.as_str()) => {
                out.extend(flatten(nested, keep));
            }
            other => {
                out.entry(key).or_insert(other);
            }
        }
    }
    out
}
