//! kind cluster configuration (`kind.x-k8s.io/v1alpha4`)

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const API_VERSION: &str = "kind.x-k8s.io/v1alpha4";
pub const KIND: &str = "Cluster";

/// kind cluster configuration, as read from kind.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindConfig {
    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Cluster name (kind falls back to "kind")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Node topology; empty means a single control-plane node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<KindNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Networking>,

    /// containerd patches, typically registry mirrors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containerd_config_patches: Vec<String>,
}

impl Default for KindConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            api_version: default_api_version(),
            name: None,
            nodes: Vec::new(),
            networking: None,
            containerd_config_patches: Vec::new(),
        }
    }
}

impl KindConfig {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    ControlPlane,
    Worker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindNode {
    pub role: NodeRole,

    /// Node image (e.g., "kindest/node:v1.31.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_port_mappings: Vec<PortMapping>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: u16,
    pub host_port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_server_port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_subnet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_subnet: Option<String>,

    #[serde(
        rename = "disableDefaultCNI",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub disable_default_cni: Option<bool>,
}

fn default_kind() -> String {
    KIND.to_string()
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}
