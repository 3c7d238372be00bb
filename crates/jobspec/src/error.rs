//! Error taxonomy.
//!
//! Every message is a pure function of the inputs, so identical calls
//! produce identical text.

use jobspec_patch::{PatchApplyError, PatchParseError};
use jobspec_pointer::{is_valid_index, JsonPointer};
use thiserror::Error;

use crate::baseline::IncompatibleValue;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The schema document itself is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("The provided schema is not a valid json schema. Schema error: {message}")]
pub struct SchemaDefinitionError {
    pub message: String,
}

/// An instance violates its schema. Only the first failing location is kept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Validation failed{}. Failure reason: {message}", field_clause(.pointer))]
pub struct SchemaValidationError {
    pub pointer: JsonPointer,
    pub message: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error(transparent)]
    Definition(#[from] SchemaDefinitionError),
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
}

/// A document does not conform to its baseline. Lists every offending path,
/// sorted by pointer text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompatibilityError {
    #[error(
        "Job is missing required attributes at the following paths: {}",
        join(.0)
    )]
    MissingFields(Vec<JsonPointer>),
    #[error(
        "Job has incompatible values for the following attributes: {}",
        join(.0)
    )]
    IncompatibleValues(Vec<IncompatibleValue>),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    SchemaDefinition(#[from] SchemaDefinitionError),
    #[error(transparent)]
    SchemaValidation(#[from] SchemaValidationError),
    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),
    #[error(transparent)]
    PatchParse(#[from] PatchParseError),
    #[error(transparent)]
    PatchApply(#[from] PatchApplyError),
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Definition(e) => Error::SchemaDefinition(e),
            SchemaError::Validation(e) => Error::SchemaValidation(e),
        }
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders ` for field 'a.b[0]'`, or nothing for the root.
fn field_clause(pointer: &JsonPointer) -> String {
    if pointer.is_root() {
        return String::new();
    }
    format!(" for field '{}'", field_path(pointer))
}

/// Dotted field notation for a pointer: `/spec/containers/0/name` becomes
/// `spec.containers[0].name`.
pub fn field_path(pointer: &JsonPointer) -> String {
    let mut out = String::new();
    for step in pointer.steps() {
        if is_valid_index(step) {
            out.push('[');
            out.push_str(step);
            out.push(']');
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(step);
        }
    }
    out
}
