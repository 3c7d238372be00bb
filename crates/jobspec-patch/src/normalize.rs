//! Normalization of user customizations into a canonical [`PatchSet`].
//!
//! Customizations arrive in three shapes: an already-built patch set, a list
//! of raw RFC 6902 records, or a JSON string encoding such a list. All of them
//! normalize to the same [`PatchSet`].

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::codec::{from_json, RecordError};
use crate::types::{PatchOperation, PatchSet};

#[derive(Debug, Error)]
pub enum PatchParseError {
    #[error(
        "Unable to parse customizations as JSON: {input}. Please make sure that the provided value is a valid JSON string."
    )]
    InvalidJson {
        input: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Customizations must be a JSON array of patch operations, got: {input}")]
    NotAnArray { input: String },
    #[error("Invalid patch operation #{index} {record}: {reason}")]
    InvalidRecord {
        index: usize,
        /// The offending record, rendered as compact JSON.
        record: String,
        #[source]
        reason: RecordError,
    },
}

/// A customization input in any of the accepted shapes.
///
/// Deserializes from a string (`Json`) or an array (`Records`), so it can be
/// embedded in configuration files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Customizations {
    #[serde(skip)]
    Patch(PatchSet),
    Records(Vec<Value>),
    Json(String),
}

impl Default for Customizations {
    fn default() -> Self {
        Customizations::Patch(PatchSet::default())
    }
}

impl Customizations {
    pub fn normalize(&self) -> Result<PatchSet, PatchParseError> {
        normalize(self)
    }
}

impl From<PatchSet> for Customizations {
    fn from(patch: PatchSet) -> Self {
        Customizations::Patch(patch)
    }
}

impl From<Vec<PatchOperation>> for Customizations {
    fn from(ops: Vec<PatchOperation>) -> Self {
        Customizations::Patch(PatchSet::from(ops))
    }
}

impl From<Vec<Value>> for Customizations {
    fn from(records: Vec<Value>) -> Self {
        Customizations::Records(records)
    }
}

impl From<String> for Customizations {
    fn from(json: String) -> Self {
        Customizations::Json(json)
    }
}

impl From<&str> for Customizations {
    fn from(json: &str) -> Self {
        Customizations::Json(json.to_string())
    }
}

/// Convert any customization shape into the canonical patch set.
pub fn normalize(input: &Customizations) -> Result<PatchSet, PatchParseError> {
    let patch = match input {
        Customizations::Patch(patch) => patch.clone(),
        Customizations::Records(records) => from_records(records)?,
        Customizations::Json(text) => from_json_str(text)?,
    };
    debug!(ops = patch.len(), "normalized customizations");
    Ok(patch)
}

/// Decode a list of raw RFC 6902 records.
pub fn from_records(records: &[Value]) -> Result<PatchSet, PatchParseError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            from_json(record).map_err(|reason| PatchParseError::InvalidRecord {
                index,
                record: record.to_string(),
                reason,
            })
        })
        .collect()
}

/// Decode a JSON string holding a list of RFC 6902 records.
pub fn from_json_str(input: &str) -> Result<PatchSet, PatchParseError> {
    let parsed: Value =
        serde_json::from_str(input).map_err(|source| PatchParseError::InvalidJson {
            input: input.to_string(),
            source,
        })?;
    match parsed {
        Value::Array(records) => from_records(&records),
        _ => Err(PatchParseError::NotAnArray {
            input: input.to_string(),
        }),
    }
}
