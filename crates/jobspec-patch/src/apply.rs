//! JSON Patch apply logic.
//!
//! [`apply_patch`] never touches the caller's document: operations run on a
//! working copy that is returned only when every operation succeeded.

use jobspec_pointer::{array_index, get, get_mut, JsonPointer};
use serde_json::Value;
use tracing::debug;

use crate::equal::deep_equal;
use crate::types::{ApplyFailure, PatchApplyError, PatchOperation, PatchSet};

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &JsonPointer, value: Value) -> Result<(), ApplyFailure> {
    let Some((parent_path, key)) = path.split_parent() else {
        *doc = value;
        return Ok(());
    };
    match get_mut(doc, parent_path).ok_or(ApplyFailure::NotFound)? {
        Value::Object(map) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = if key == "-" {
                arr.len()
            } else {
                array_index(key).ok_or(ApplyFailure::InvalidIndex)?
            };
            if idx > arr.len() {
                return Err(ApplyFailure::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(())
        }
        _ => Err(ApplyFailure::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &JsonPointer) -> Result<Value, ApplyFailure> {
    let (parent_path, key) = path.split_parent().ok_or(ApplyFailure::RootRemoval)?;
    match get_mut(doc, parent_path).ok_or(ApplyFailure::NotFound)? {
        Value::Object(map) => map.shift_remove(key).ok_or(ApplyFailure::NotFound),
        Value::Array(arr) => {
            let idx = array_index(key).ok_or(ApplyFailure::InvalidIndex)?;
            if idx >= arr.len() {
                return Err(ApplyFailure::NotFound);
            }
            Ok(arr.remove(idx))
        }
        _ => Err(ApplyFailure::InvalidTarget),
    }
}

fn apply_replace(doc: &mut Value, path: &JsonPointer, value: Value) -> Result<(), ApplyFailure> {
    let target = get_mut(doc, path).ok_or(ApplyFailure::NotFound)?;
    *target = value;
    Ok(())
}

fn apply_copy(doc: &mut Value, from: &JsonPointer, path: &JsonPointer) -> Result<(), ApplyFailure> {
    let src = get(doc, from).ok_or(ApplyFailure::SourceNotFound)?.clone();
    apply_add(doc, path, src)
}

fn apply_move(doc: &mut Value, from: &JsonPointer, path: &JsonPointer) -> Result<(), ApplyFailure> {
    if path.is_descendant_of(from) {
        return Err(ApplyFailure::MoveIntoDescendant);
    }
    if path == from {
        return get(doc, from).map(|_| ()).ok_or(ApplyFailure::SourceNotFound);
    }
    let value = apply_remove(doc, from).map_err(|failure| match failure {
        ApplyFailure::NotFound => ApplyFailure::SourceNotFound,
        other => other,
    })?;
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &JsonPointer, value: &Value) -> Result<(), ApplyFailure> {
    let actual = get(doc, path).ok_or(ApplyFailure::NotFound)?;
    if deep_equal(actual, value) {
        Ok(())
    } else {
        Err(ApplyFailure::TestFailed)
    }
}

// ── Main apply functions ──────────────────────────────────────────────────

/// Apply a single operation to the document in place.
///
/// On failure `doc` may be partially modified (a `move` whose destination is
/// invalid has already removed its source); use [`apply_patch`] for
/// all-or-nothing semantics.
pub fn apply_operation(doc: &mut Value, op: &PatchOperation) -> Result<(), ApplyFailure> {
    match op {
        PatchOperation::Add { path, value } => apply_add(doc, path, value.clone()),
        PatchOperation::Remove { path } => apply_remove(doc, path).map(drop),
        PatchOperation::Replace { path, value } => apply_replace(doc, path, value.clone()),
        PatchOperation::Move { from, path } => apply_move(doc, from, path),
        PatchOperation::Copy { from, path } => apply_copy(doc, from, path),
        PatchOperation::Test { path, value } => apply_test(doc, path, value),
    }
}

/// Apply a patch set to a copy of `target` and return the result.
///
/// Either every operation succeeds, or an error describing the first failing
/// operation is returned. `target` itself is never modified.
pub fn apply_patch(target: &Value, patch: &PatchSet) -> Result<Value, PatchApplyError> {
    let mut working = target.clone();
    for (index, op) in patch.iter().enumerate() {
        if let Err(reason) = apply_operation(&mut working, op) {
            debug!(
                index,
                op = op.op_name(),
                path = %op.path(),
                %reason,
                "patch rejected, target left unchanged"
            );
            return Err(PatchApplyError {
                index,
                op: op.op_name(),
                path: op.path().clone(),
                reason,
            });
        }
    }
    debug!(ops = patch.len(), "patch applied");
    Ok(working)
}

/// Apply a patch set to `doc`, replacing it only if every operation succeeds.
pub fn apply_patch_in_place(doc: &mut Value, patch: &PatchSet) -> Result<(), PatchApplyError> {
    *doc = apply_patch(doc, patch)?;
    Ok(())
}

impl PatchSet {
    /// See [`apply_patch`].
    pub fn apply(&self, target: &Value) -> Result<Value, PatchApplyError> {
        apply_patch(target, self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
