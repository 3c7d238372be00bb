//! Kubernetes job configuration: the owner of a job manifest.
//!
//! Unset default fields (the namespace, at least) are filled first. The
//! manifest must then contain every field of the baseline with the
//! baseline's pinned values. Customizations are applied after validation,
//! then the namespace and image shortcuts are stamped on top.

use jobspec_patch::{Customizations, PatchOperation, PatchSet};
use jobspec_pointer::{get, JsonPointer};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::baseline::{require_all_baseline_fields, require_compatible_values};
use crate::error::Result;
use crate::reconcile::{is_set, reconcile_defaults, DefaultField};

pub const DEFAULT_NAMESPACE: &str = "default";

/// `/metadata/namespace`
pub fn namespace_pointer() -> JsonPointer {
    JsonPointer::from(["metadata", "namespace"])
}

/// `/spec/template/spec/containers/0/image`
pub fn image_pointer() -> JsonPointer {
    JsonPointer::from(["spec", "template", "spec", "containers", "0", "image"])
}

/// The baseline every job manifest must conform to.
pub fn base_job_manifest() -> Value {
    json!({
        "apiVersion": "batch/v1",
        "kind": "Job",
        "metadata": {"labels": {}},
        "spec": {
            "template": {
                "spec": {
                    "parallelism": 1,
                    "completions": 1,
                    "restartPolicy": "Never",
                    "containers": [
                        {"name": "job", "env": []}
                    ]
                }
            }
        }
    })
}

/// Values used for fields nobody set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JobDefaults {
    pub namespace: String,
    pub image: Option<String>,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            image: None,
        }
    }
}

impl JobDefaults {
    /// The defaults as manifest fields, for [`crate::reconcile_defaults`].
    pub fn fields(&self) -> Vec<DefaultField> {
        let mut fields = vec![DefaultField::new(namespace_pointer(), self.namespace.as_str())];
        if let Some(image) = &self.image {
            fields.push(DefaultField::new(image_pointer(), image.as_str()));
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KubernetesJobConfig {
    pub namespace: Option<String>,
    pub image: Option<String>,
    /// The job manifest. The baseline is used when absent.
    pub job: Option<Value>,
    pub customizations: Customizations,
}

impl KubernetesJobConfig {
    fn job_field(&self, pointer: &JsonPointer) -> Option<&Value> {
        self.job.as_ref().and_then(|job| get(job, pointer))
    }

    /// Sets `namespace` unless it or the manifest's namespace is already set.
    pub fn set_default_namespace(&mut self, default: &str) {
        let own = self.namespace.as_deref().is_some_and(|ns| !ns.is_empty());
        if !own && !is_set(self.job_field(&namespace_pointer())) {
            self.namespace = Some(default.to_string());
        }
    }

    /// Sets `image` unless it or the manifest's first container image is already set.
    pub fn set_default_image(&mut self, default: &str) {
        let own = self.image.as_deref().is_some_and(|image| !image.is_empty());
        if !own && !is_set(self.job_field(&image_pointer())) {
            self.image = Some(default.to_string());
        }
    }

    pub fn apply_defaults(&mut self, defaults: &JobDefaults) {
        self.set_default_namespace(&defaults.namespace);
        if let Some(image) = &defaults.image {
            self.set_default_image(image);
        }
    }

    /// Checks the configured manifest, if any, against `baseline`.
    pub fn validate_job(&self, baseline: &Value) -> Result<()> {
        if let Some(job) = &self.job {
            require_all_baseline_fields(job, baseline)?;
            require_compatible_values(job, baseline)?;
        }
        Ok(())
    }

    /// [`Self::build_job_manifest_with_defaults`] with [`JobDefaults::default`],
    /// so an unset namespace becomes `default`.
    pub fn build_job_manifest(&self, baseline: &Value) -> Result<Value> {
        self.build_job_manifest_with_defaults(baseline, &JobDefaults::default())
    }

    /// Fills unset default fields, validates the manifest, applies
    /// customizations atomically, then sets the configured namespace and image.
    pub fn build_job_manifest_with_defaults(
        &self,
        baseline: &Value,
        defaults: &JobDefaults,
    ) -> Result<Value> {
        let manifest = self.job.as_ref().unwrap_or(baseline);
        let manifest = reconcile_defaults(manifest, baseline, &defaults.fields());
        require_all_baseline_fields(&manifest, baseline)?;
        require_compatible_values(&manifest, baseline)?;

        let customizations = self.customizations.normalize()?;
        let manifest = customizations.apply(&manifest)?;

        let shortcuts: PatchSet = [
            (namespace_pointer(), &self.namespace),
            (image_pointer(), &self.image),
        ]
        .into_iter()
        .filter_map(|(path, value)| {
            value.as_ref().map(|value| PatchOperation::Add {
                path,
                value: Value::from(value.as_str()),
            })
        })
        .collect();
        let manifest = shortcuts.apply(&manifest)?;
        debug!(
            customizations = customizations.len(),
            shortcuts = shortcuts.len(),
            "built job manifest"
        );
        Ok(manifest)
    }
}
