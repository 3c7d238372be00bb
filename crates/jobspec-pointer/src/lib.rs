//! JSON Pointer (RFC 6901) utilities.
//!
//! Every location inside a job manifest, a baseline template or a patch
//! operation is addressed by a [`JsonPointer`]: an ordered list of unescaped
//! path steps. Array indices are plain decimal steps without leading zeros.
//!
//! # Example
//!
//! ```
//! use jobspec_pointer::{get, parse_json_pointer, JsonPointer};
//!
//! let pointer = parse_json_pointer("/metadata/namespace").unwrap();
//! assert_eq!(pointer.steps(), ["metadata", "namespace"]);
//! assert_eq!(pointer.to_string(), "/metadata/namespace");
//!
//! let doc = serde_json::json!({"metadata": {"namespace": "default"}});
//! assert_eq!(get(&doc, &pointer), Some(&serde_json::json!("default")));
//! assert!(JsonPointer::root().is_root());
//! ```

use thiserror::Error;

pub mod get;
pub mod types;
pub mod validate;

pub use get::{get, get_mut};
pub use types::{JsonPointer, PathStep};
pub use validate::{validate_json_pointer, validate_path, MAX_PATH_LENGTH, MAX_POINTER_LENGTH};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer {0:?} must be empty or start with '/'")]
    MissingLeadingSlash(String),
    #[error("pointer {0:?} contains an invalid '~' escape")]
    InvalidEscape(String),
    #[error("pointer is {0} characters long, the limit is {MAX_POINTER_LENGTH}")]
    TooLong(usize),
    #[error("path has {0} steps, the limit is {MAX_PATH_LENGTH}")]
    PathTooLong(usize),
}

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use jobspec_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use jobspec_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("plain"), "plain");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

fn has_valid_escapes(component: &str) -> bool {
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c == '~' && !matches!(chars.next(), Some('0' | '1')) {
            return false;
        }
    }
    true
}

/// Parses a JSON Pointer string.
///
/// The empty string is the root pointer. Any other pointer must start with
/// `/`, and every `~` must be followed by `0` or `1`.
///
/// ```
/// use jobspec_pointer::parse_json_pointer;
///
/// assert!(parse_json_pointer("").unwrap().is_root());
/// assert_eq!(parse_json_pointer("/").unwrap().steps(), [""]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d").unwrap().steps(), ["a~b", "c/d"]);
/// assert!(parse_json_pointer("foo").is_err());
/// assert!(parse_json_pointer("/a~2").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<JsonPointer, PointerError> {
    validate_json_pointer(pointer)?;
    if pointer.is_empty() {
        return Ok(JsonPointer::root());
    }
    let steps = pointer[1..]
        .split('/')
        .map(|component| {
            if has_valid_escapes(component) {
                Ok(unescape_component(component))
            } else {
                Err(PointerError::InvalidEscape(pointer.to_string()))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_path(&steps)?;
    Ok(JsonPointer::from(steps))
}

/// Formats path steps into a JSON Pointer string.
///
/// ```
/// use jobspec_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["a/b".to_string(), "0".to_string()]), "/a~1b/0");
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Checks whether a step is a canonical array index (`0`, `7`, `42`, never `07`).
///
/// ```
/// use jobspec_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("+1"));
/// ```
pub fn is_valid_index(step: &str) -> bool {
    let bytes = step.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

/// Parses a step as an array index.
pub fn array_index(step: &str) -> Option<usize> {
    if is_valid_index(step) {
        step.parse().ok()
    } else {
        None
    }
}
