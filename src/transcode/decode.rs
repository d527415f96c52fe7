//! Schema-agnostic decoding of response bodies into snake_case keys.

use crate::case::to_snake_case;
use crate::error::{Error, Result};
use crate::value::{WireMap, WireValue};

/// A decoded body: snake_case keys, with the top-level identifier lifted out.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub body: WireValue,
    pub id: Option<String>,
}

/// Snake-case every key of a response body. Only the top-level `id` is hoisted; deeper `id` keys
/// stay in place as ordinary data.
pub fn decode(value: WireValue) -> Result<Decoded> {
    match value {
        WireValue::Map(map) => {
            let mut id = None;
            let mut body = WireMap::new();
            for (key, v) in map {
                let name = to_snake_case(&key);
                if name == "id" {
                    match identifier(&v) {
                        Some(found) => {
                            id = Some(found);
                            continue;
                        }
                        None => tracing::debug!(kind = v.kind(), "top-level id is not a scalar"),
                    }
                }
                body.insert(name, decode_value(v)?);
            }
            Ok(Decoded {
                body: WireValue::Map(body),
                id,
            })
        }
        other => Ok(Decoded {
            body: decode_value(other)?,
            id: None,
        }),
    }
}

fn decode_value(value: WireValue) -> Result<WireValue> {
    match value {
        WireValue::Map(map) => {
            let mut out = WireMap::new();
            for (key, v) in map {
                out.insert(to_snake_case(&key), decode_value(v)?);
            }
            Ok(WireValue::Map(out))
        }
        WireValue::List(items) => items
            .into_iter()
            .map(decode_value)
            .collect::<Result<Vec<_>>>()
            .map(WireValue::List),
        WireValue::Bytes(_) => Err(Error::UnsupportedValueKind { kind: "bytes" }),
        scalar => Ok(scalar),
    }
}

pub(crate) fn identifier(value: &WireValue) -> Option<String> {
    match value {
        WireValue::String(s) => Some(s.clone()),
        WireValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
