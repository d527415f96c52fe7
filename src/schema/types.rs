//! Declarative field schema: names, kinds, cardinalities and mutability of a resource's fields.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Scalar kind of a leaf value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Int => write!(f, "int"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::String => write!(f, "string"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    Scalar,
    List,
    /// Unordered, duplicate-free collection. Encoded in a deterministic order.
    Set,
    /// String-keyed map of scalars, or a nested object when an element schema is present.
    Map,
}

/// Who supplies the value: the server, or the caller (mandatory or not).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    Computed,
    Required,
    Optional,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub value_kind: ValueKind,
    pub cardinality: Cardinality,
    /// Nested object schema for list/set elements or for a nested object (`Map`).
    pub element: Option<Arc<FieldSchema>>,
    pub mutability: Mutability,
    /// Changing the value requires destroy and recreate.
    pub force_replace: bool,
    pub description: Option<String>,
}

impl FieldSpec {
    fn new(value_kind: ValueKind, cardinality: Cardinality) -> Self {
        Self {
            value_kind,
            cardinality,
            element: None,
            mutability: Mutability::Optional,
            force_replace: false,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(ValueKind::String, Cardinality::Scalar)
    }

    pub fn bool() -> Self {
        Self::new(ValueKind::Bool, Cardinality::Scalar)
    }

    pub fn int() -> Self {
        Self::new(ValueKind::Int, Cardinality::Scalar)
    }

    pub fn float() -> Self {
        Self::new(ValueKind::Float, Cardinality::Scalar)
    }

    /// Ordered list of scalars.
    pub fn list_of(kind: ValueKind) -> Self {
        Self::new(kind, Cardinality::List)
    }

    /// Set of scalars.
    pub fn set_of(kind: ValueKind) -> Self {
        Self::new(kind, Cardinality::Set)
    }

    /// Free-form map from string keys to scalars.
    pub fn map_of(kind: ValueKind) -> Self {
        Self::new(kind, Cardinality::Map)
    }

    /// Ordered list of nested objects.
    pub fn list_of_objects(schema: FieldSchema) -> Self {
        Self::new(ValueKind::String, Cardinality::List).with_element(schema)
    }

    /// Set of nested objects.
    pub fn set_of_objects(schema: FieldSchema) -> Self {
        Self::new(ValueKind::String, Cardinality::Set).with_element(schema)
    }

    /// Single nested object.
    pub fn object(schema: FieldSchema) -> Self {
        Self::new(ValueKind::String, Cardinality::Map).with_element(schema)
    }

    fn with_element(mut self, schema: FieldSchema) -> Self {
        self.element = Some(Arc::new(schema));
        self
    }

    pub fn required(mut self) -> Self {
        self.mutability = Mutability::Required;
        self
    }

    pub fn optional(mut self) -> Self {
        self.mutability = Mutability::Optional;
        self
    }

    pub fn computed(mut self) -> Self {
        self.mutability = Mutability::Computed;
        self
    }

    pub fn force_replace(mut self) -> Self {
        self.force_replace = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_computed(&self) -> bool {
        self.mutability == Mutability::Computed
    }

    /// Human-readable shape used in error messages, e.g. "list<string>".
    pub fn shape(&self) -> String {
        let elem = match &self.element {
            Some(_) => "object".to_string(),
            None => self.value_kind.to_string(),
        };
        match self.cardinality {
            Cardinality::Scalar => elem,
            Cardinality::List => format!("list<{}>", elem),
            Cardinality::Set => format!("set<{}>", elem),
            Cardinality::Map if self.element.is_some() => "object".to_string(),
            Cardinality::Map => format!("map<{}>", elem),
        }
    }
}

/// Field name -> spec. Iteration order is the sorted field name order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSchema {
    fields: BTreeMap<String, FieldSpec>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method to add a field.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
