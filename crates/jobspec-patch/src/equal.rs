//! Structural JSON equality with numbers compared by value.

use serde_json::{Number, Value};

/// Deep equality where `1`, `1.0` and `1e0` are the same number.
///
/// ```
/// use jobspec_patch::deep_equal;
/// use serde_json::json;
///
/// assert!(deep_equal(&json!({"completions": [1, 2]}), &json!({"completions": [1.0, 2.0]})));
/// assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| deep_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| deep_equal(a, b)))
        }
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a == b;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_and_float_forms_match() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(deep_equal(&json!(-3), &json!(-3.0)));
        assert!(deep_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!deep_equal(&json!(1), &json!(1.5)));
    }

    #[test]
    fn large_integers_are_exact() {
        assert!(!deep_equal(&json!(9_007_199_254_740_993i64), &json!(9_007_199_254_740_992i64)));
    }

    #[test]
    fn types_never_coerce() {
        assert!(!deep_equal(&json!(1), &json!("1")));
        assert!(!deep_equal(&json!(0), &json!(false)));
        assert!(!deep_equal(&json!(null), &json!({})));
    }

    #[test]
    fn containers_compare_recursively() {
        assert!(deep_equal(&json!({"a": [1, {"b": 2}]}), &json!({"a": [1.0, {"b": 2.0}]})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"b": 1})));
        assert!(!deep_equal(&json!([1]), &json!([1, 1])));
    }
}
