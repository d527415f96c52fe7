//! Schema validation: naming and structural consistency, checked at registration.

use crate::error::Error;
use crate::schema::{Cardinality, FieldSchema};
use regex::Regex;

const FIELD_NAME_PATTERN: &str = r"^[a-z][a-z0-9]*(_[a-z][a-z0-9]*)*$";

pub fn validate_schema(schema: &FieldSchema) -> Result<(), Error> {
    let re = Regex::new(FIELD_NAME_PATTERN).map_err(|e| Error::InvalidSchema(e.to_string()))?;
    if schema.contains("id") {
        return Err(Error::InvalidSchema("id is a reserved field name".into()));
    }
    validate_fields(schema, "", &re)
}

fn validate_fields(schema: &FieldSchema, prefix: &str, re: &Regex) -> Result<(), Error> {
    for (name, spec) in schema.iter() {
        let path = format!("{}{}", prefix, name);
        if !re.is_match(name) {
            return Err(Error::InvalidSchema(format!(
                "{} must be lowercase snake_case with every segment starting with a letter",
                path
            )));
        }
        if spec.cardinality == Cardinality::Scalar && spec.element.is_some() {
            return Err(Error::InvalidSchema(format!(
                "{} is a scalar and cannot declare an element schema",
                path
            )));
        }
        if spec.force_replace && spec.is_computed() {
            return Err(Error::InvalidSchema(format!(
                "{} is computed and cannot force replacement",
                path
            )));
        }
        if let Some(element) = &spec.element {
            if element.is_empty() {
                return Err(Error::InvalidSchema(format!("{} has an empty element schema", path)));
            }
            validate_fields(element, &format!("{}.", path), re)?;
        }
    }
    Ok(())
}
