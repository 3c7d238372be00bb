//! JSON codec for JSON Patch operations.
//!
//! Converts operations to and from `serde_json::Value` in RFC 6902 format.
//! Fields an operation does not use are ignored on decode.

use jobspec_pointer::{parse_json_pointer, JsonPointer, PointerError};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::types::{PatchOperation, PatchSet};

/// Why a raw record is not a valid patch operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("operation must be an object")]
    NotAnObject,
    #[error("missing 'op' field")]
    MissingOp,
    #[error("unknown op {0:?}")]
    UnknownOp(String),
    #[error("'{op}' requires '{field}'")]
    MissingField {
        op: &'static str,
        field: &'static str,
    },
    #[error("'{0}' must be a string")]
    NotAString(&'static str),
    #[error("'{field}' is not a valid JSON pointer: {source}")]
    InvalidPointer {
        field: &'static str,
        #[source]
        source: PointerError,
    },
}

// ── Field helpers ─────────────────────────────────────────────────────────

fn decode_pointer(
    obj: &Map<String, Value>,
    op: &'static str,
    field: &'static str,
) -> Result<JsonPointer, RecordError> {
    let raw = obj
        .get(field)
        .ok_or(RecordError::MissingField { op, field })?
        .as_str()
        .ok_or(RecordError::NotAString(field))?;
    parse_json_pointer(raw).map_err(|source| RecordError::InvalidPointer { field, source })
}

fn decode_value(obj: &Map<String, Value>, op: &'static str) -> Result<Value, RecordError> {
    obj.get("value")
        .cloned()
        .ok_or(RecordError::MissingField { op, field: "value" })
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an operation to its RFC 6902 object form.
pub fn to_json(op: &PatchOperation) -> Value {
    match op {
        PatchOperation::Add { path, value } => json!({
            "op": "add",
            "path": path.to_string(),
            "value": value
        }),
        PatchOperation::Remove { path } => json!({
            "op": "remove",
            "path": path.to_string()
        }),
        PatchOperation::Replace { path, value } => json!({
            "op": "replace",
            "path": path.to_string(),
            "value": value
        }),
        PatchOperation::Move { from, path } => json!({
            "op": "move",
            "from": from.to_string(),
            "path": path.to_string()
        }),
        PatchOperation::Copy { from, path } => json!({
            "op": "copy",
            "from": from.to_string(),
            "path": path.to_string()
        }),
        PatchOperation::Test { path, value } => json!({
            "op": "test",
            "path": path.to_string(),
            "value": value
        }),
    }
}

/// Serialize a whole patch set to a JSON Patch document.
pub fn patch_to_json(patch: &PatchSet) -> Value {
    Value::Array(patch.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Deserialize one RFC 6902 record into an operation.
pub fn from_json(v: &Value) -> Result<PatchOperation, RecordError> {
    let obj = v.as_object().ok_or(RecordError::NotAnObject)?;
    let op_str = obj
        .get("op")
        .ok_or(RecordError::MissingOp)?
        .as_str()
        .ok_or(RecordError::NotAString("op"))?;

    match op_str {
        "add" => Ok(PatchOperation::Add {
            path: decode_pointer(obj, "add", "path")?,
            value: decode_value(obj, "add")?,
        }),
        "remove" => Ok(PatchOperation::Remove {
            path: decode_pointer(obj, "remove", "path")?,
        }),
        "replace" => Ok(PatchOperation::Replace {
            path: decode_pointer(obj, "replace", "path")?,
            value: decode_value(obj, "replace")?,
        }),
        "move" => Ok(PatchOperation::Move {
            from: decode_pointer(obj, "move", "from")?,
            path: decode_pointer(obj, "move", "path")?,
        }),
        "copy" => Ok(PatchOperation::Copy {
            from: decode_pointer(obj, "copy", "from")?,
            path: decode_pointer(obj, "copy", "path")?,
        }),
        "test" => Ok(PatchOperation::Test {
            path: decode_pointer(obj, "test", "path")?,
            value: decode_value(obj, "test")?,
        }),
        other => Err(RecordError::UnknownOp(other.to_string())),
    }
}

impl PatchSet {
    /// Serialize to a JSON Patch document.
    pub fn to_json(&self) -> Value {
        patch_to_json(self)
    }
}
