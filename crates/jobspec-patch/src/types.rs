//! Core types for the JSON Patch module.

use serde_json::Value;
use thiserror::Error;

pub use jobspec_pointer::JsonPointer;

// ── Errors ────────────────────────────────────────────────────────────────

/// Why a single operation could not be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyFailure {
    #[error("path does not exist")]
    NotFound,
    #[error("source path does not exist")]
    SourceNotFound,
    #[error("array index is invalid or out of range")]
    InvalidIndex,
    #[error("parent value is not an object or array")]
    InvalidTarget,
    #[error("cannot move a value into one of its own descendants")]
    MoveIntoDescendant,
    #[error("cannot remove the document root")]
    RootRemoval,
    #[error("test failed, value does not match")]
    TestFailed,
}

/// A patch was rejected; the target document is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to apply operation #{index} ({op} at '{path}'): {reason}")]
pub struct PatchApplyError {
    /// Position of the failing operation in the patch set.
    pub index: usize,
    pub op: &'static str,
    pub path: JsonPointer,
    pub reason: ApplyFailure,
}

// ── Operations ────────────────────────────────────────────────────────────

/// A JSON Patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOperation {
    Add { path: JsonPointer, value: Value },
    Remove { path: JsonPointer },
    Replace { path: JsonPointer, value: Value },
    Move { from: JsonPointer, path: JsonPointer },
    Copy { from: JsonPointer, path: JsonPointer },
    Test { path: JsonPointer, value: Value },
}

impl PatchOperation {
    /// Returns the wire name of the operation.
    pub fn op_name(&self) -> &'static str {
        match self {
            PatchOperation::Add { .. } => "add",
            PatchOperation::Remove { .. } => "remove",
            PatchOperation::Replace { .. } => "replace",
            PatchOperation::Move { .. } => "move",
            PatchOperation::Copy { .. } => "copy",
            PatchOperation::Test { .. } => "test",
        }
    }

    /// Returns the target path of the operation.
    pub fn path(&self) -> &JsonPointer {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. }
            | PatchOperation::Move { path, .. }
            | PatchOperation::Copy { path, .. }
            | PatchOperation::Test { path, .. } => path,
        }
    }

    /// Returns the source path of `move` and `copy`.
    pub fn from_path(&self) -> Option<&JsonPointer> {
        match self {
            PatchOperation::Move { from, .. } | PatchOperation::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Returns the payload of `add`, `replace` and `test`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOperation::Add { value, .. }
            | PatchOperation::Replace { value, .. }
            | PatchOperation::Test { value, .. } => Some(value),
            _ => None,
        }
    }
}

// ── Patch set ─────────────────────────────────────────────────────────────

/// The canonical, ordered representation of a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchSet {
    ops: Vec<PatchOperation>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PatchOperation] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: PatchOperation) {
        self.ops.push(op);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatchOperation> {
        self.ops.iter()
    }

    pub fn into_ops(self) -> Vec<PatchOperation> {
        self.ops
    }
}

impl From<Vec<PatchOperation>> for PatchSet {
    fn from(ops: Vec<PatchOperation>) -> Self {
        Self { ops }
    }
}

impl FromIterator<PatchOperation> for PatchSet {
    fn from_iter<I: IntoIterator<Item = PatchOperation>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PatchSet {
    type Item = PatchOperation;
    type IntoIter = std::vec::IntoIter<PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_follow_variant_shape() {
        let mv = PatchOperation::Move {
            from: JsonPointer::from(["a"]),
            path: JsonPointer::from(["b"]),
        };
        assert_eq!(mv.op_name(), "move");
        assert_eq!(mv.path().to_string(), "/b");
        assert_eq!(mv.from_path().map(ToString::to_string), Some("/a".to_string()));
        assert_eq!(mv.value(), None);

        let test = PatchOperation::Test {
            path: JsonPointer::from(["a"]),
            value: json!(1),
        };
        assert_eq!(test.value(), Some(&json!(1)));
        assert_eq!(test.from_path(), None);
    }

    #[test]
    fn apply_error_display_names_operation() {
        let err = PatchApplyError {
            index: 1,
            op: "remove",
            path: JsonPointer::from(["missing"]),
            reason: ApplyFailure::NotFound,
        };
        assert_eq!(
            err.to_string(),
            "failed to apply operation #1 (remove at '/missing'): path does not exist"
        );
    }
}
