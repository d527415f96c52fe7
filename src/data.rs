//! Per-instance configuration data supplied and persisted by the host runtime.

use crate::error::{Error, Result};
use crate::schema::FieldSchema;
use crate::value::WireValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The live data bag for one resource instance. An empty id means "does not exist".
pub trait ResourceData: Send {
    /// Current value of a field; `Null` when unset.
    fn get(&self, name: &str) -> WireValue;
    fn set(&mut self, name: &str, value: WireValue) -> Result<()>;
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// In-memory `ResourceData` bound to a schema. `set` rejects fields the schema does not declare.
#[derive(Clone, Debug)]
pub struct MemoryResourceData {
    schema: Arc<FieldSchema>,
    id: String,
    values: BTreeMap<String, WireValue>,
}

impl MemoryResourceData {
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        Self {
            schema,
            id: String::new(),
            values: BTreeMap::new(),
        }
    }

    /// Build from a JSON object of snake_case field values (e.g. a host's planned state).
    pub fn from_json(schema: Arc<FieldSchema>, values: serde_json::Value) -> Result<Self> {
        let mut data = Self::new(schema);
        match WireValue::from(values) {
            WireValue::Map(m) => {
                for (k, v) in m {
                    data.set(&k, v)?;
                }
                Ok(data)
            }
            other => Err(Error::TypeMismatch {
                field: "<root>".into(),
                expected: "map".into(),
                got: other.kind().into(),
            }),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// All set fields as a JSON object, for handing state back to the host.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl ResourceData for MemoryResourceData {
    fn get(&self, name: &str) -> WireValue {
        self.values.get(name).cloned().unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: WireValue) -> Result<()> {
        if !self.schema.contains(name) {
            return Err(Error::UnknownField(name.to_string()));
        }
        if value.is_null() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
        Ok(())
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
