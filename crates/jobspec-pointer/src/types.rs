//! Type definitions for JSON Pointer.

use std::fmt;
use std::str::FromStr;

use crate::{format_json_pointer, parse_json_pointer, PointerError};

/// A single unescaped step of a path: an object key or a decimal array index.
pub type PathStep = String;

/// A parsed JSON Pointer.
///
/// Equality and hashing are by steps. `Display` renders RFC 6901 text, which
/// is also the order callers sort findings by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    steps: Vec<PathStep>,
}

impl JsonPointer {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn push(&mut self, step: impl Into<PathStep>) {
        self.steps.push(step.into());
    }

    /// Returns a new pointer one level below `self`.
    pub fn child(&self, step: impl Into<PathStep>) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step.into());
        Self { steps }
    }

    /// Splits into the parent steps and the last step. `None` for the root.
    pub fn split_parent(&self) -> Option<(&[PathStep], &PathStep)> {
        self.steps.split_last().map(|(last, parent)| (parent, last))
    }

    pub fn parent(&self) -> Option<JsonPointer> {
        self.split_parent()
            .map(|(parent, _)| JsonPointer::from(parent.to_vec()))
    }

    /// True if `prefix` equals `self` or is one of its ancestors.
    pub fn starts_with(&self, prefix: &JsonPointer) -> bool {
        self.steps.starts_with(&prefix.steps)
    }

    /// True if `self` is a strict descendant of `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &JsonPointer) -> bool {
        self.steps.len() > ancestor.steps.len() && self.starts_with(ancestor)
    }

    pub fn into_steps(self) -> Vec<PathStep> {
        self.steps
    }
}

impl From<Vec<PathStep>> for JsonPointer {
    fn from(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }
}

impl From<&[&str]> for JsonPointer {
    fn from(steps: &[&str]) -> Self {
        Self {
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for JsonPointer {
    fn from(steps: [&str; N]) -> Self {
        Self::from(&steps[..])
    }
}

impl AsRef<[PathStep]> for JsonPointer {
    fn as_ref(&self) -> &[PathStep] {
        &self.steps
    }
}

impl std::ops::Deref for JsonPointer {
    type Target = [PathStep];

    fn deref(&self) -> &[PathStep] {
        &self.steps
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_json_pointer(&self.steps))
    }
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_json_pointer(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_does_not_touch_parent() {
        let parent = JsonPointer::from(["spec"]);
        let child = parent.child("template");
        assert_eq!(parent.to_string(), "/spec");
        assert_eq!(child.to_string(), "/spec/template");
        assert_eq!(child.parent(), Some(parent));
    }

    #[test]
    fn root_has_no_parent() {
        assert_eq!(JsonPointer::root().parent(), None);
        assert_eq!(JsonPointer::root().to_string(), "");
    }

    #[test]
    fn descendant_is_strict() {
        let a = JsonPointer::from(["a"]);
        let ab = JsonPointer::from(["a", "b"]);
        assert!(ab.is_descendant_of(&a));
        assert!(!a.is_descendant_of(&a));
        assert!(a.starts_with(&a));
        assert!(ab.starts_with(&JsonPointer::root()));
    }

    #[test]
    fn from_str_roundtrips_display() {
        let p: JsonPointer = "/a~1b/~0/3".parse().unwrap();
        assert_eq!(p.steps(), ["a/b", "~", "3"]);
        assert_eq!(p.to_string(), "/a~1b/~0/3");
    }
}
