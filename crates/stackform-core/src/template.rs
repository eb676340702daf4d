//! Template Document: the shared, mutable resource graph
//!
//! Every feature compiler in a pipeline run holds a reference to one
//! document and only ever inserts new entries or patches entries it
//! knows the logical id of. Key order is preserved end to end because
//! the serialized template is a wire document consumed byte-for-byte by
//! the provisioning backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CompileError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    #[serde(rename = "Resources")]
    pub resources: Map<String, Value>,
    #[serde(rename = "Outputs")]
    pub outputs: Map<String, Value>,
}

impl TemplateDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a resource definition under `logical_id`.
    pub fn insert_resource(&mut self, logical_id: impl Into<String>, definition: Value) {
        self.resources.insert(logical_id.into(), definition);
    }

    /// Insert (or replace) an output entry under `name`.
    pub fn insert_output(&mut self, name: impl Into<String>, output: Value) {
        self.outputs.insert(name.into(), output);
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Value> {
        self.resources.get(logical_id)
    }

    pub fn has_resource(&self, logical_id: &str) -> bool {
        self.resources.contains_key(logical_id)
    }

    /// Remove exactly one property from the resource at `logical_id`,
    /// leaving its other properties and its `Type` untouched.
    ///
    /// The resource must already exist: the pipeline driver runs
    /// producers before the compilers that patch them, and a missing
    /// resource here is an ordering bug in the pipeline, not a runtime
    /// condition this component recovers from. Stripping a property
    /// that is not present is a no-op.
    pub fn strip_property(&mut self, logical_id: &str, property: &str) {
        if let Some(properties) = self
            .resources
            .get_mut(logical_id)
            .and_then(|resource| resource.get_mut("Properties"))
            .and_then(Value::as_object_mut)
        {
            properties.remove(property);
        }
    }

    /// blake3 fingerprint of the serialized document.
    pub fn fingerprint(&self) -> Result<String, CompileError> {
        let bytes =
            serde_json::to_vec(self).map_err(|e| CompileError::Serialize(e.to_string()))?;
        Ok(format!("blake3:{}", blake3::hash(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document_with_deployment() -> TemplateDocument {
        let mut template = TemplateDocument::new();
        template.insert_resource(
            "ApiGatewayDeployment",
            json!({
                "Type": "AWS::ApiGateway::Deployment",
                "Properties": {
                    "RestApiId": { "Ref": "ApiGatewayRestApi" },
                    "StageName": "dev",
                },
            }),
        );
        template
    }

    #[test]
    fn test_strip_property_removes_only_the_named_key() {
        let mut template = document_with_deployment();
        template.strip_property("ApiGatewayDeployment", "StageName");

        let resource = template.resource("ApiGatewayDeployment").unwrap();
        let properties = resource.get("Properties").unwrap().as_object().unwrap();
        assert!(!properties.contains_key("StageName"));
        assert!(properties.contains_key("RestApiId"));
        assert_eq!(
            resource.get("Type").unwrap(),
            "AWS::ApiGateway::Deployment"
        );
    }

    #[test]
    fn test_strip_property_is_idempotent() {
        let mut template = document_with_deployment();
        template.strip_property("ApiGatewayDeployment", "StageName");
        template.strip_property("ApiGatewayDeployment", "StageName");

        let properties = template
            .resource("ApiGatewayDeployment")
            .and_then(|r| r.get("Properties"))
            .and_then(Value::as_object)
            .unwrap();
        assert_eq!(properties.len(), 1);
    }

    #[test]
    fn test_strip_absent_property_is_a_noop() {
        let mut template = document_with_deployment();
        let before = template.clone();
        template.strip_property("ApiGatewayDeployment", "Description");
        assert_eq!(template, before);
    }

    #[test]
    fn test_fingerprint_is_stable_for_equal_documents() {
        let a = document_with_deployment();
        let b = document_with_deployment();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_fingerprint_changes_on_mutation() {
        let mut template = document_with_deployment();
        let before = template.fingerprint().unwrap();
        template.strip_property("ApiGatewayDeployment", "StageName");
        assert_ne!(before, template.fingerprint().unwrap());
    }
}
