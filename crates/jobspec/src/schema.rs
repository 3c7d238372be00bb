//! JSON Schema (draft 2020-12) checks for schema-bearing configuration.

use std::borrow::Cow;

use jobspec_pointer::{unescape_component, JsonPointer};
use jsonschema::Draft;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SchemaDefinitionError, SchemaError, SchemaValidationError};

/// Keywords whose object value maps names to subschemas.
const NAMED_SUBSCHEMAS: &[&str] = &[
    "properties",
    "patternProperties",
    "$defs",
    "definitions",
    "dependentSchemas",
];

/// Keywords whose value is instance data, not a schema.
const DATA_KEYWORDS: &[&str] = &["const", "default", "enum", "examples"];

/// Validates `schema` against the draft 2020-12 meta-schema. `None` is valid.
pub fn check_schema_well_formed(schema: Option<&Value>) -> Result<(), SchemaDefinitionError> {
    let Some(schema) = schema else {
        return Ok(());
    };
    jsonschema::draft202012::meta::validate(schema).map_err(|err| SchemaDefinitionError {
        message: err.to_string(),
    })
}

/// Validates `instance` against `schema`.
///
/// Succeeds trivially when either side is absent. With `ignore_required`,
/// every `required` keyword is dropped first, so partial documents pass.
pub fn validate_instance(
    instance: Option<&Value>,
    schema: Option<&Value>,
    ignore_required: bool,
) -> Result<(), SchemaError> {
    let (Some(instance), Some(schema)) = (instance, schema) else {
        return Ok(());
    };
    let schema = if ignore_required {
        Cow::Owned(strip_required(schema))
    } else {
        Cow::Borrowed(schema)
    };
    check_schema_well_formed(Some(&*schema))?;

    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| SchemaDefinitionError {
            message: err.to_string(),
        })?;
    if let Some(err) = validator.iter_errors(instance).next() {
        let location = err.instance_path.to_string();
        debug!(pointer = %location, "instance violates schema");
        return Err(SchemaValidationError {
            pointer: location_pointer(&location),
            message: err.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Splits a validator instance location into steps. Unlike
/// `parse_json_pointer` this applies no length limits, since the location
/// mirrors a document that already exists.
fn location_pointer(location: &str) -> JsonPointer {
    location
        .strip_prefix('/')
        .map_or_else(JsonPointer::root, |rest| {
            rest.split('/').map(unescape_component).collect::<Vec<_>>().into()
        })
}

/// Returns `schema` with every `required` keyword removed, at any depth.
///
/// Property names are never treated as keywords, so a property called
/// `required` survives. Instance data under `const`, `default`, `enum` and
/// `examples` is copied untouched.
pub fn strip_required(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| key.as_str() != "required")
                .map(|(key, value)| {
                    let value = if NAMED_SUBSCHEMAS.contains(&key.as_str()) {
                        strip_named(value)
                    } else if DATA_KEYWORDS.contains(&key.as_str()) {
                        value.clone()
                    } else {
                        strip_required(value)
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_required).collect()),
        other => other.clone(),
    }
}

fn strip_named(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(name, subschema)| (name.clone(), strip_required(subschema)))
                .collect::<Map<String, Value>>(),
        ),
        other => strip_required(other),
    }
}
