//! JSON Patch (RFC 6902) for job manifests.
//!
//! # Operations
//!
//! The six standard operations are supported: `add`, `remove`, `replace`,
//! `move`, `copy` and `test`. A [`PatchSet`] is an ordered list of them;
//! operations apply left to right against the evolving document.
//!
//! # Pipeline
//!
//! - [`normalize`] turns any accepted [`Customizations`] shape into a
//!   [`PatchSet`].
//! - [`apply_patch`] applies a [`PatchSet`] atomically: the caller's
//!   document is never modified, and on failure no partial result exists.
//! - [`diff`] produces the [`PatchSet`] that turns one document into another.

pub mod apply;
pub mod codec;
pub mod diff;
pub mod equal;
pub mod normalize;
pub mod types;

pub use apply::{apply_operation, apply_patch, apply_patch_in_place};
pub use codec::{from_json, patch_to_json, to_json, RecordError};
pub use diff::diff;
pub use equal::deep_equal;
pub use normalize::{normalize, Customizations, PatchParseError};
pub use types::{ApplyFailure, JsonPointer, PatchApplyError, PatchOperation, PatchSet};
