use serde_json::Value;

use crate::array_index;

/// Get a value from a JSON document by path.
///
/// Returns `None` if a key is missing, an index is out of range or not a
/// canonical index, or a step descends into a scalar.
///
/// ```
/// use jobspec_pointer::get;
/// use serde_json::json;
///
/// let doc = json!({"containers": [{"image": "busybox"}]});
/// let path = ["containers".to_string(), "0".to_string(), "image".to_string()];
/// assert_eq!(get(&doc, &path), Some(&json!("busybox")));
/// assert_eq!(get(&doc, &["containers".to_string(), "1".to_string()]), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for path_step in path {
        current = match current {
            Value::Array(arr) => arr.get(array_index(path_step)?)?,
            Value::Object(map) => map.get(path_step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut current = val;
    for path_step in path {
        current = match current {
            Value::Array(arr) => arr.get_mut(array_index(path_step)?)?,
            Value::Object(map) => map.get_mut(path_step)?,
            _ => return None,
        };
    }
    Some(current)
}
