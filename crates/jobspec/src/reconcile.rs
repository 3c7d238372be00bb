//! Default-field reconciliation.
//!
//! Runs before the baseline checks: a field that neither the document nor
//! the baseline sets gets a caller-supplied default.

use jobspec_patch::ApplyFailure;
use jobspec_pointer::{array_index, get, JsonPointer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultField {
    pub pointer: JsonPointer,
    pub value: Value,
}

impl DefaultField {
    pub fn new(pointer: JsonPointer, value: impl Into<Value>) -> Self {
        Self {
            pointer,
            value: value.into(),
        }
    }
}

/// `null` and `""` count as unset.
pub(crate) fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Returns a copy of `document` with every unset default filled in.
pub fn reconcile_defaults(document: &Value, baseline: &Value, defaults: &[DefaultField]) -> Value {
    let mut out = document.clone();
    for field in defaults {
        if is_set(get(document, &field.pointer)) || is_set(get(baseline, &field.pointer)) {
            continue;
        }
        match set_creating_parents(&mut out, &field.pointer, field.value.clone()) {
            Ok(()) => debug!(pointer = %field.pointer, "filled default field"),
            Err(reason) => warn!(pointer = %field.pointer, %reason, "cannot fill default field"),
        }
    }
    out
}

fn empty_container_for(next_step: &str) -> Value {
    if next_step == "-" || array_index(next_step) == Some(0) {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

/// Writes `value` at `pointer`, creating missing (or `null`) intermediate
/// containers. Array steps may only address an existing element or the end.
fn set_creating_parents(doc: &mut Value, pointer: &JsonPointer, value: Value) -> Result<(), ApplyFailure> {
    let Some((parents, last)) = pointer.split_parent() else {
        *doc = value;
        return Ok(());
    };
    let mut current = doc;
    for (depth, step) in parents.iter().enumerate() {
        let next_step = parents.get(depth + 1).unwrap_or(last);
        current = match current {
            Value::Object(map) => {
                let slot = map.entry(step.clone()).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = empty_container_for(next_step);
                }
                slot
            }
            Value::Array(arr) => {
                let idx = if step == "-" {
                    arr.len()
                } else {
                    array_index(step).ok_or(ApplyFailure::InvalidIndex)?
                };
                if idx == arr.len() {
                    arr.push(empty_container_for(next_step));
                }
                let slot = arr.get_mut(idx).ok_or(ApplyFailure::InvalidIndex)?;
                if slot.is_null() {
                    *slot = empty_container_for(next_step);
                }
                slot
            }
            _ => return Err(ApplyFailure::InvalidTarget),
        };
    }
    match current {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = if last == "-" {
                arr.len()
            } else {
                array_index(last).ok_or(ApplyFailure::InvalidIndex)?
            };
            match idx.cmp(&arr.len()) {
                std::cmp::Ordering::Less => arr[idx] = value,
                std::cmp::Ordering::Equal => arr.push(value),
                std::cmp::Ordering::Greater => return Err(ApplyFailure::InvalidIndex),
            }
            Ok(())
        }
        _ => Err(ApplyFailure::InvalidTarget),
    }
}
