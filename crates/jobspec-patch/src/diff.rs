//! JSON Patch diff: generate a patch set from two document values.
//!
//! Objects are compared key by key, arrays index by index, numbers by value. The output order
//! is fully determined by the inputs: within an object, removals come first
//! (in source key order), then additions and nested changes (in destination
//! key order); within an array, common indices first, then the tail.

use jobspec_pointer::JsonPointer;
use serde_json::{Map, Value};

use crate::equal::deep_equal;
use crate::types::{PatchOperation, PatchSet};

// ── Public API ────────────────────────────────────────────────────────────

/// Generate a patch set that transforms `src` into `dst`.
///
/// ```
/// use jobspec_patch::{apply_patch, diff};
/// use serde_json::json;
///
/// let src = json!({"image": "img:1", "args": ["a", "b"]});
/// let dst = json!({"image": "img:2", "args": ["a"], "env": []});
/// let patch = diff(&src, &dst);
/// assert_eq!(apply_patch(&src, &patch).unwrap(), dst);
/// ```
pub fn diff(src: &Value, dst: &Value) -> PatchSet {
    let mut ops = PatchSet::new();
    diff_at_path(&mut ops, &JsonPointer::root(), src, dst);
    ops
}

impl PatchSet {
    /// See [`diff`].
    pub fn from_diff(src: &Value, dst: &Value) -> PatchSet {
        diff(src, dst)
    }
}

// ── Core recursive differ ─────────────────────────────────────────────────

fn diff_at_path(ops: &mut PatchSet, path: &JsonPointer, src: &Value, dst: &Value) {
    if deep_equal(src, dst) {
        return;
    }
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => diff_obj(ops, path, s, d),
        (Value::Array(s), Value::Array(d)) => diff_arr(ops, path, s, d),
        _ => ops.push(PatchOperation::Replace {
            path: path.clone(),
            value: dst.clone(),
        }),
    }
}

fn diff_obj(ops: &mut PatchSet, path: &JsonPointer, src: &Map<String, Value>, dst: &Map<String, Value>) {
    for key in src.keys() {
        if !dst.contains_key(key) {
            ops.push(PatchOperation::Remove {
                path: path.child(key.as_str()),
            });
        }
    }
    for (key, dst_val) in dst {
        let child = path.child(key.as_str());
        match src.get(key) {
            None => ops.push(PatchOperation::Add {
                path: child,
                value: dst_val.clone(),
            }),
            Some(src_val) => diff_at_path(ops, &child, src_val, dst_val),
        }
    }
}

fn diff_arr(ops: &mut PatchSet, path: &JsonPointer, src: &[Value], dst: &[Value]) {
    let common = src.len().min(dst.len());
    for (i, (s, d)) in src.iter().zip(dst).enumerate() {
        diff_at_path(ops, &path.child(i.to_string()), s, d);
    }
    // Remove from the end so earlier indices stay valid.
    for i in (common..src.len()).rev() {
        ops.push(PatchOperation::Remove {
            path: path.child(i.to_string()),
        });
    }
    for (i, value) in dst.iter().enumerate().skip(common) {
        ops.push(PatchOperation::Add {
            path: path.child(i.to_string()),
            value: value.clone(),
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::apply_patch;
    use serde_json::json;

    fn names(patch: &PatchSet) -> Vec<(&'static str, String)> {
        patch
            .iter()
            .map(|op| (op.op_name(), op.path().to_string()))
            .collect()
    }

    #[test]
    fn diff_equal_docs() {
        assert!(diff(&json!({"a": 1}), &json!({"a": 1})).is_empty());
    }

    #[test]
    fn diff_equal_docs_with_different_key_order() {
        assert!(diff(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})).is_empty());
    }

    #[test]
    fn diff_ignores_numeric_representation() {
        assert!(diff(&json!({"completions": 1, "ratio": [0.5]}), &json!({"completions": 1.0, "ratio": [0.5]})).is_empty());
        let ops = diff(&json!({"completions": 1}), &json!({"completions": 1.5}));
        assert_eq!(names(&ops), [("replace", "/completions".to_string())]);
    }

    #[test]
    fn diff_replace_scalar_at_root() {
        let ops = diff(&json!(1), &json!(2));
        assert_eq!(names(&ops), [("replace", String::new())]);
    }

    #[test]
    fn diff_type_change_is_replace() {
        let ops = diff(&json!({"a": [1]}), &json!({"a": {"0": 1}}));
        assert_eq!(names(&ops), [("replace", "/a".to_string())]);
    }

    #[test]
    fn diff_add_and_remove_keys() {
        let ops = diff(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 3}));
        assert_eq!(
            names(&ops),
            [("remove", "/b".to_string()), ("add", "/c".to_string())]
        );
    }

    #[test]
    fn diff_nested_object() {
        let ops = diff(
            &json!({"user": {"name": "Alice", "age": 30}}),
            &json!({"user": {"name": "Alice", "age": 31}}),
        );
        assert_eq!(names(&ops), [("replace", "/user/age".to_string())]);
        assert_eq!(ops.ops()[0].value(), Some(&json!(31)));
    }

    #[test]
    fn diff_array_element_wise() {
        let ops = diff(&json!([1, 2, 3]), &json!([1, 9]));
        assert_eq!(
            names(&ops),
            [("replace", "/1".to_string()), ("remove", "/2".to_string())]
        );
    }

    #[test]
    fn diff_array_tail_removed_from_the_end() {
        let src = json!([1, 2, 3, 4]);
        let ops = diff(&src, &json!([1]));
        assert_eq!(
            names(&ops),
            [
                ("remove", "/3".to_string()),
                ("remove", "/2".to_string()),
                ("remove", "/1".to_string())
            ]
        );
        assert_eq!(apply_patch(&src, &ops).unwrap(), json!([1]));
    }

    #[test]
    fn diff_array_tail_added_in_order() {
        let src = json!({"containers": []});
        let dst = json!({"containers": [{"name": "a"}, {"name": "b"}]});
        let ops = diff(&src, &dst);
        assert_eq!(
            names(&ops),
            [
                ("add", "/containers/0".to_string()),
                ("add", "/containers/1".to_string())
            ]
        );
        assert_eq!(apply_patch(&src, &ops).unwrap(), dst);
    }

    #[test]
    fn diff_keys_needing_escapes() {
        let src = json!({"metadata": {"labels": {}}});
        let dst = json!({"metadata": {"labels": {"app.kubernetes.io/name": "x"}}});
        let ops = diff(&src, &dst);
        assert_eq!(
            names(&ops),
            [("add", "/metadata/labels/app.kubernetes.io~1name".to_string())]
        );
        assert_eq!(apply_patch(&src, &ops).unwrap(), dst);
    }

    #[test]
    fn diff_is_deterministic() {
        let src = json!({"a": {"x": 1, "y": [1, 2]}, "b": true});
        let dst = json!({"a": {"y": [2], "z": null}, "c": "new"});
        assert_eq!(diff(&src, &dst), diff(&src, &dst));
    }
}
