//! Structural reconciliation of infrastructure job manifests.
//!
//! A job manifest is checked against a baseline template (every baseline
//! field present, every pinned value matching), customized with a JSON
//! Patch supplied in any accepted shape, and filled with defaults for the
//! few fields that must always be set.
//!
//! ```
//! use jobspec::{base_job_manifest, require_all_baseline_fields, KubernetesJobConfig};
//! use serde_json::json;
//!
//! let baseline = base_job_manifest();
//! let err = require_all_baseline_fields(&json!({"kind": "Job"}), &baseline).unwrap_err();
//! assert!(err.to_string().starts_with("Job is missing required attributes"));
//!
//! let config = KubernetesJobConfig {
//!     namespace: Some("batch".into()),
//!     customizations: r#"[{"op":"add","path":"/spec/backoffLimit","value":0}]"#.into(),
//!     ..Default::default()
//! };
//! let manifest = config.build_job_manifest(&baseline).unwrap();
//! assert_eq!(manifest["metadata"]["namespace"], json!("batch"));
//! assert_eq!(manifest["spec"]["backoffLimit"], json!(0));
//! ```

pub mod baseline;
pub mod error;
pub mod job;
pub mod parameters;
pub mod reconcile;
pub mod schema;

pub use baseline::{
    classify_against_baseline, require_all_baseline_fields, require_compatible_values,
    Classification, IncompatibleValue,
};
pub use error::{
    CompatibilityError, Error, Result, SchemaDefinitionError, SchemaError, SchemaValidationError,
};
pub use job::{base_job_manifest, JobDefaults, KubernetesJobConfig};
pub use parameters::ParameterSchemaPolicy;
pub use reconcile::{reconcile_defaults, DefaultField};
pub use schema::{check_schema_well_formed, strip_required, validate_instance};

pub use jobspec_patch::{
    apply_patch, diff, normalize, Customizations, PatchApplyError, PatchOperation,
    PatchParseError, PatchSet,
};
pub use jobspec_pointer::JsonPointer;
