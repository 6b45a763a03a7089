//! eksctl cluster configuration (`eksctl.io/v1alpha5`)

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const API_VERSION: &str = "eksctl.io/v1alpha5";
pub const KIND: &str = "ClusterConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ClusterMeta>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_groups: Vec<NodeGroup>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: None,
            availability_zones: Vec::new(),
            node_groups: Vec::new(),
        }
    }
}

impl ClusterConfig {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Metadata name, if any
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.name.as_str())
    }

    pub fn region(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.region.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMeta {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Kubernetes version (e.g., "1.31")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroup {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<u32>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Sizing lives inline on the node group in eksctl files
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub scaling_config: Option<ScalingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_capacity: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i32>,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eksctl_yaml() {
        let yaml = r#"
apiVersion: eksctl.io/v1alpha5
kind: ClusterConfig
metadata:
  name: prod
  region: eu-west-1
  version: "1.31"
  tags:
    team: platform
nodeGroups:
  - name: ng-1
    instanceType: m5.large
    desiredCapacity: 3
    minSize: 0
    maxSize: 5
    labels:
      role: worker
"#;
        let config: ClusterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name(), Some("prod"));
        assert_eq!(config.region(), Some("eu-west-1"));

        let ng = &config.node_groups[0];
        assert_eq!(ng.instance_type.as_deref(), Some("m5.large"));
        assert_eq!(
            ng.scaling_config,
            Some(ScalingConfig {
                desired_capacity: Some(3),
                min_size: Some(0),
                max_size: Some(5),
            })
        );
    }

    #[test]
    fn test_missing_metadata() {
        let config: ClusterConfig = serde_yaml::from_str("kind: ClusterConfig\n").unwrap();
        assert!(config.metadata.is_none());
        assert_eq!(config.name(), None);
    }

    #[test]
    fn test_scaling_serializes_inline() {
        let config = ClusterConfig {
            node_groups: vec![NodeGroup {
                name: "ng-1".to_string(),
                scaling_config: Some(ScalingConfig {
                    desired_capacity: Some(2),
                    min_size: Some(1),
                    max_size: None,
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("desiredCapacity: 2"));
        assert!(yaml.contains("minSize: 1"));
        assert!(!yaml.contains("maxSize"));
        assert!(!yaml.contains("scalingConfig"));
    }
}
