//! # Agent Helm Config Schema
//!
//! Attribute schema, inputs and computed state of the `hcs_agent_helm_config`
//! data source.

use serde::{Deserialize, Serialize};

use super::error::ReadError;
use super::validation::{validate_resource_group_name, validate_resource_name, validate_slug_id};

pub const RESOURCE_GROUP_NAME: &str = "resource_group_name";
pub const MANAGED_APPLICATION_NAME: &str = "managed_application_name";
pub const AKS_CLUSTER_NAME: &str = "aks_cluster_name";
pub const AKS_RESOURCE_GROUP: &str = "aks_resource_group";
pub const CONFIG: &str = "config";
pub const ID: &str = "id";

/// How an attribute is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

/// Schema entry for one string attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub mode: AttributeMode,
    pub description: &'static str,
}

/// Attribute schema of the data source
pub fn schema() -> Vec<Attribute> {
    vec![
        Attribute {
            name: RESOURCE_GROUP_NAME,
            mode: AttributeMode::Required,
            description: "The name of the Resource Group in which the HCS Azure Managed Application belongs.",
        },
        Attribute {
            name: MANAGED_APPLICATION_NAME,
            mode: AttributeMode::Required,
            description: "The name of the HCS Azure Managed Application.",
        },
        Attribute {
            name: AKS_CLUSTER_NAME,
            mode: AttributeMode::Required,
            description: "The name of the AKS cluster that will consume the Helm config.",
        },
        Attribute {
            name: AKS_RESOURCE_GROUP,
            mode: AttributeMode::Optional,
            description: "The resource group name of the AKS cluster. Defaults to resource_group_name.",
        },
        Attribute {
            name: CONFIG,
            mode: AttributeMode::Computed,
            description: "The agent Helm config.",
        },
        Attribute {
            name: ID,
            mode: AttributeMode::Computed,
            description: "The managed application id suffixed with /agent-helm-config.",
        },
    ]
}

/// Configured inputs of the data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHelmConfigInputs {
    pub resource_group_name: String,
    pub managed_application_name: String,
    pub aks_cluster_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aks_resource_group: Option<String>,
}

impl AgentHelmConfigInputs {
    pub fn new(
        resource_group_name: impl Into<String>,
        managed_application_name: impl Into<String>,
        aks_cluster_name: impl Into<String>,
    ) -> Self {
        Self {
            resource_group_name: resource_group_name.into(),
            managed_application_name: managed_application_name.into(),
            aks_cluster_name: aks_cluster_name.into(),
            aks_resource_group: None,
        }
    }

    #[must_use]
    pub fn with_aks_resource_group(mut self, aks_resource_group: impl Into<String>) -> Self {
        self.aks_resource_group = Some(aks_resource_group.into());
        self
    }

    /// Validate every attribute
    ///
    /// # Errors
    /// Returns [`ReadError::InvalidInput`] for the first attribute that fails validation.
    pub fn validate(&self) -> Result<(), ReadError> {
        let invalid = |attribute: &'static str| {
            move |message: String| ReadError::InvalidInput { attribute, message }
        };

        validate_resource_group_name(&self.resource_group_name)
            .map_err(invalid(RESOURCE_GROUP_NAME))?;
        validate_slug_id(&self.managed_application_name)
            .map_err(invalid(MANAGED_APPLICATION_NAME))?;
        validate_resource_name(&self.aks_cluster_name).map_err(invalid(AKS_CLUSTER_NAME))?;
        if let Some(aks_resource_group) = &self.aks_resource_group {
            validate_resource_name(aks_resource_group).map_err(invalid(AKS_RESOURCE_GROUP))?;
        }
        Ok(())
    }

    /// Resource group of the AKS cluster
    ///
    /// Defaults to `resource_group_name` when `aks_resource_group` is unset or empty.
    pub fn effective_aks_resource_group(&self) -> &str {
        match self.aks_resource_group.as_deref() {
            Some(rg) if !rg.is_empty() => rg,
            _ => &self.resource_group_name,
        }
    }
}

/// State produced by a successful read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHelmConfigState {
    /// `<managed application id>/agent-helm-config`
    pub id: String,
    /// The rendered Helm values
    pub config: String,
    #[serde(flatten)]
    pub inputs: AgentHelmConfigInputs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_modes() {
        let schema = schema();
        let mode = |name: &str| schema.iter().find(|a| a.name == name).map(|a| a.mode);
        assert_eq!(mode(RESOURCE_GROUP_NAME), Some(AttributeMode::Required));
        assert_eq!(mode(MANAGED_APPLICATION_NAME), Some(AttributeMode::Required));
        assert_eq!(mode(AKS_CLUSTER_NAME), Some(AttributeMode::Required));
        assert_eq!(mode(AKS_RESOURCE_GROUP), Some(AttributeMode::Optional));
        assert_eq!(mode(CONFIG), Some(AttributeMode::Computed));
        assert_eq!(mode(ID), Some(AttributeMode::Computed));
    }

    #[test]
    fn test_effective_aks_resource_group_defaults() {
        let inputs = AgentHelmConfigInputs::new("rg", "app", "aks");
        assert_eq!(inputs.effective_aks_resource_group(), "rg");

        let inputs = inputs.with_aks_resource_group("");
        assert_eq!(inputs.effective_aks_resource_group(), "rg");

        let inputs = inputs.with_aks_resource_group("aks-rg");
        assert_eq!(inputs.effective_aks_resource_group(), "aks-rg");
    }

    #[test]
    fn test_validate_reports_attribute() {
        let err = AgentHelmConfigInputs::new("rg", "a_b", "aks")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ReadError::InvalidInput {
                attribute: MANAGED_APPLICATION_NAME,
                ..
            }
        ));

        let err = AgentHelmConfigInputs::new("rg", "app", "aks")
            .with_aks_resource_group("")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ReadError::InvalidInput {
                attribute: AKS_RESOURCE_GROUP,
                ..
            }
        ));
    }

    #[test]
    fn test_dot_segment_names_are_rejected() {
        let err = AgentHelmConfigInputs::new("rg", "app", "..")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ReadError::InvalidInput {
                attribute: AKS_CLUSTER_NAME,
                ..
            }
        ));
        assert!(AgentHelmConfigInputs::new("rg", "app", "aks")
            .with_aks_resource_group(".")
            .validate()
            .is_err());
    }

    #[test]
    fn test_inputs_deserialize_without_optional() {
        let inputs: AgentHelmConfigInputs = serde_json::from_str(
            r#"{"resource_group_name":"rg","managed_application_name":"app","aks_cluster_name":"aks"}"#,
        )
        .unwrap();
        assert!(inputs.aks_resource_group.is_none());
        assert!(inputs.validate().is_ok());
    }
}
