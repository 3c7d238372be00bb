//! Parameter schema enforcement for job deployments.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{SchemaDefinitionError, SchemaError};
use crate::schema::{check_schema_well_formed, validate_instance};

/// Whether and how a deployment's parameters are checked against its schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParameterSchemaPolicy {
    pub enforce_parameter_schema: bool,
    pub parameter_openapi_schema: Option<Value>,
}

impl ParameterSchemaPolicy {
    /// Rejects a malformed schema, but only when enforcement is on.
    pub fn validate_schema(&self) -> Result<(), SchemaDefinitionError> {
        if !self.enforce_parameter_schema {
            return Ok(());
        }
        check_schema_well_formed(self.parameter_openapi_schema.as_ref())
    }

    /// Checks `parameters` against the schema. Required properties are not
    /// enforced, since parameters may be supplied partially and filled later.
    pub fn validate_parameters(&self, parameters: Option<&Value>) -> Result<(), SchemaError> {
        if !self.enforce_parameter_schema {
            debug!("parameter schema enforcement disabled");
            return Ok(());
        }
        validate_instance(parameters, self.parameter_openapi_schema.as_ref(), true)
    }

    /// The schema, or an empty object schema when none is configured.
    pub fn schema_or_empty(&self) -> Value {
        self.parameter_openapi_schema.clone().unwrap_or_else(|| {
            json!({"title": "Parameters", "type": "object", "properties": {}})
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(enforce: bool) -> ParameterSchemaPolicy {
        ParameterSchemaPolicy {
            enforce_parameter_schema: enforce,
            parameter_openapi_schema: Some(json!({
                "type": "object",
                "properties": {
                    "retries": {"type": "integer", "minimum": 0},
                    "name": {"type": "string"}
                },
                "required": ["name"]
            })),
        }
    }

    #[test]
    fn disabled_policy_accepts_anything() {
        let p = ParameterSchemaPolicy {
            enforce_parameter_schema: false,
            parameter_openapi_schema: Some(json!({"type": 12})),
        };
        assert!(p.validate_schema().is_ok());
        assert!(p.validate_parameters(Some(&json!("nope"))).is_ok());
    }

    #[test]
    fn malformed_schema_rejected_when_enforced() {
        let p = ParameterSchemaPolicy {
            enforce_parameter_schema: true,
            parameter_openapi_schema: Some(json!({"type": 12})),
        };
        assert!(p.validate_schema().is_err());
    }

    #[test]
    fn partial_parameters_pass() {
        assert!(policy(true).validate_parameters(Some(&json!({"retries": 2}))).is_ok());
    }

    #[test]
    fn bad_parameter_reports_field() {
        let err = policy(true)
            .validate_parameters(Some(&json!({"retries": -1})))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Validation failed for field 'retries'. Failure reason: "));
    }

    #[test]
    fn absent_parameters_pass() {
        assert!(policy(true).validate_parameters(None).is_ok());
    }

    #[test]
    fn empty_schema_placeholder() {
        assert_eq!(
            ParameterSchemaPolicy::default().schema_or_empty(),
            json!({"title": "Parameters", "type": "object", "properties": {}})
        );
        assert_eq!(policy(false).schema_or_empty()["required"], json!(["name"]));
    }
}
