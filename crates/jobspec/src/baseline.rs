//! Conformance of a document to a baseline template.
//!
//! The document is diffed *towards* the baseline: an `add` means the
//! baseline has a field the document lacks, a `replace` means the document
//! holds a different value where the baseline pins one. Anything the
//! document has on top of the baseline shows up as `remove` and is accepted,
//! so manifests can be freely extended.

use std::fmt;

use jobspec_patch::{diff, PatchOperation};
use jobspec_pointer::JsonPointer;
use serde_json::Value;
use tracing::debug;

use crate::error::CompatibilityError;

/// A path where the document's value differs from the baseline's.
#[derive(Debug, Clone, PartialEq)]
pub struct IncompatibleValue {
    pub path: JsonPointer,
    /// The value the baseline requires at `path`.
    pub required: Value,
}

impl fmt::Display for IncompatibleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must have value {}", self.path, render_value(&self.required))
    }
}

/// Strings quoted and escaped, everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote_string(s),
        other => other.to_string(),
    }
}

/// Single quotes, unless the text has a `'` and no `"`.
fn quote_string(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Findings of a document against its baseline, each list sorted by pointer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub missing: Vec<JsonPointer>,
    pub incompatible: Vec<IncompatibleValue>,
}

impl Classification {
    pub fn is_conformant(&self) -> bool {
        self.missing.is_empty() && self.incompatible.is_empty()
    }
}

pub fn classify_against_baseline(document: &Value, baseline: &Value) -> Classification {
    let mut findings = Classification::default();
    for op in diff(document, baseline) {
        match op {
            PatchOperation::Add { path, .. } => findings.missing.push(path),
            PatchOperation::Replace { path, value } => findings.incompatible.push(IncompatibleValue {
                path,
                required: value,
            }),
            // Extra document content is allowed.
            PatchOperation::Remove { .. }
            | PatchOperation::Move { .. }
            | PatchOperation::Copy { .. }
            | PatchOperation::Test { .. } => {}
        }
    }
    findings.missing.sort_by_cached_key(ToString::to_string);
    findings
        .incompatible
        .sort_by_cached_key(|finding| finding.path.to_string());
    debug!(
        missing = findings.missing.len(),
        incompatible = findings.incompatible.len(),
        "classified document against baseline"
    );
    findings
}

/// Fails if the document lacks any field the baseline defines.
pub fn require_all_baseline_fields(document: &Value, baseline: &Value) -> Result<(), CompatibilityError> {
    let missing = classify_against_baseline(document, baseline).missing;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CompatibilityError::MissingFields(missing))
    }
}

/// Fails if the document contradicts any value the baseline pins.
pub fn require_compatible_values(document: &Value, baseline: &Value) -> Result<(), CompatibilityError> {
    let incompatible = classify_against_baseline(document, baseline).incompatible;
    if incompatible.is_empty() {
        Ok(())
    } else {
        Err(CompatibilityError::IncompatibleValues(incompatible))
    }
}
