//! WireValue: the JSON-shaped tree exchanged with the vendor API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::collections::BTreeMap;

pub type WireMap = BTreeMap<String, WireValue>;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum WireValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<WireValue>),
    Map(WireMap),
    /// Raw payload sent without JSON encoding (e.g. zipped templates). Never produced by decoding.
    Bytes(Vec<u8>),
}

impl WireValue {
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Bool(_) => "bool",
            WireValue::Number(n) if n.is_f64() => "float",
            WireValue::Number(_) => "int",
            WireValue::String(_) => "string",
            WireValue::List(_) => "list",
            WireValue::Map(_) => "map",
            WireValue::Bytes(_) => "bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    /// Null or the empty string: both mean "absent" on the way out.
    pub fn is_absent(&self) -> bool {
        match self {
            WireValue::Null => true,
            WireValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            WireValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WireValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&WireMap> {
        match self {
            WireValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut WireMap> {
        match self {
            WireValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<WireMap> {
        match self {
            WireValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.as_map().and_then(|m| m.get(key))
    }

    pub fn from_f64(f: f64) -> Self {
        Number::from_f64(f).map(WireValue::Number).unwrap_or(WireValue::Null)
    }
}

impl From<serde_json::Value> for WireValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => WireValue::Null,
            serde_json::Value::Bool(b) => WireValue::Bool(b),
            serde_json::Value::Number(n) => WireValue::Number(n),
            serde_json::Value::String(s) => WireValue::String(s),
            serde_json::Value::Array(a) => WireValue::List(a.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(o) => {
                WireValue::Map(o.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<WireValue> for serde_json::Value {
    fn from(v: WireValue) -> Self {
        match v {
            WireValue::Null => serde_json::Value::Null,
            WireValue::Bool(b) => serde_json::Value::Bool(b),
            WireValue::Number(n) => serde_json::Value::Number(n),
            WireValue::String(s) => serde_json::Value::String(s),
            WireValue::List(l) => serde_json::Value::Array(l.into_iter().map(Into::into).collect()),
            WireValue::Map(m) => {
                serde_json::Value::Object(m.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            WireValue::Bytes(b) => {
                serde_json::Value::Array(b.into_iter().map(|x| serde_json::Value::Number(x.into())).collect())
            }
        }
    }
}

impl From<bool> for WireValue {
    fn from(b: bool) -> Self {
        WireValue::Bool(b)
    }
}

impl From<i64> for WireValue {
    fn from(n: i64) -> Self {
        WireValue::Number(n.into())
    }
}

impl From<&str> for WireValue {
    fn from(s: &str) -> Self {
        WireValue::String(s.to_string())
    }
}

impl From<String> for WireValue {
    fn from(s: String) -> Self {
        WireValue::String(s)
    }
}

impl From<Vec<WireValue>> for WireValue {
    fn from(l: Vec<WireValue>) -> Self {
        WireValue::List(l)
    }
}

impl From<WireMap> for WireValue {
    fn from(m: WireMap) -> Self {
        WireValue::Map(m)
    }
}

impl Serialize for WireValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            WireValue::Null => serializer.serialize_unit(),
            WireValue::Bool(b) => serializer.serialize_bool(*b),
            WireValue::Number(n) => n.serialize(serializer),
            WireValue::String(s) => serializer.serialize_str(s),
            WireValue::List(l) => l.serialize(serializer),
            WireValue::Map(m) => m.serialize(serializer),
            WireValue::Bytes(b) => b.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for WireValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;
        Ok(v.into())
    }
}
