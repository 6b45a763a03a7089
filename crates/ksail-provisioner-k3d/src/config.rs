//! k3d configuration types
//!
//! [`SimpleConfig`] mirrors the user-facing `k3d.io/v1alpha5` `Simple` file.
//! [`ClusterConfig`] is the fully defaulted form that is turned into
//! `k3d cluster create` flags. [`Cluster`] is the runtime handle reported by
//! `k3d cluster get/list -o json`.

use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "k3d.io/v1alpha5";
pub const KIND: &str = "Simple";

/// k3d's own default cluster name
pub const DEFAULT_CLUSTER_NAME: &str = "k3s-default";

/// k3s node image used when the configuration does not pin one
pub const DEFAULT_IMAGE: &str = "rancher/k3s:v1.31.5-k3s1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleConfig {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(rename = "kubeAPI", default, skip_serializing_if = "Option::is_none")]
    pub kube_api: Option<KubeApi>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortWithNodeFilters>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registries: Option<Registries>,

    #[serde(default)]
    pub options: SimpleOptions,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: Metadata::default(),
            servers: None,
            agents: None,
            image: None,
            kube_api: None,
            ports: Vec::new(),
            network: None,
            registries: None,
            options: SimpleOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeApi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "hostIP", default, skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<u16>,
}

/// Port mapping in k3d syntax (`8080:80`) with the nodes it applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortWithNodeFilters {
    pub port: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_filters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registries {
    /// Existing registries to connect (e.g., "k3d-registry:5000")
    #[serde(rename = "use", default, skip_serializing_if = "Vec::is_empty")]
    pub use_registries: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<RegistryCreate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleOptions {
    #[serde(default)]
    pub k3d: K3dOptions,

    #[serde(default)]
    pub k3s: K3sOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct K3dOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<bool>,

    /// Go-style duration (e.g., "60s")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct K3sOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<ArgWithNodeFilters>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgWithNodeFilters {
    pub arg: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_filters: Vec<String>,
}

/// Fully resolved cluster definition, ready to run
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub name: String,
    pub servers: u32,
    pub agents: u32,
    pub image: String,
    pub kube_api: Option<KubeApi>,
    pub ports: Vec<PortWithNodeFilters>,
    pub network: Option<String>,
    pub registries: Registries,
    pub k3s_args: Vec<ArgWithNodeFilters>,
    pub wait: bool,
    pub timeout: Option<String>,
}

impl ClusterConfig {
    /// Arguments for `k3d`, starting at `cluster create`
    pub fn to_create_args(&self) -> Vec<String> {
        let mut args = vec![
            "cluster".to_string(),
            "create".to_string(),
            self.name.clone(),
            "--servers".to_string(),
            self.servers.to_string(),
            "--agents".to_string(),
            self.agents.to_string(),
            "--image".to_string(),
            self.image.clone(),
        ];

        if let Some(api) = &self.kube_api {
            if let Some(port) = api.host_port {
                let host = api.host_ip.as_deref().or(api.host.as_deref());
                args.push("--api-port".to_string());
                args.push(match host {
                    Some(host) => format!("{}:{}", host, port),
                    None => port.to_string(),
                });
            }
        }

        for port in &self.ports {
            args.push("--port".to_string());
            args.push(with_node_filters(&port.port, &port.node_filters));
        }

        if let Some(network) = &self.network {
            args.push("--network".to_string());
            args.push(network.clone());
        }

        for registry in &self.registries.use_registries {
            args.push("--registry-use".to_string());
            args.push(registry.clone());
        }

        if let Some(create) = &self.registries.create {
            let mut spec = create
                .name
                .clone()
                .unwrap_or_else(|| format!("{}-registry", self.name));
            if let Some(host) = &create.host {
                spec.push(':');
                spec.push_str(host);
            }
            if let Some(port) = &create.host_port {
                spec.push(':');
                spec.push_str(port);
            }
            args.push("--registry-create".to_string());
            args.push(spec);
        }

        for arg in &self.k3s_args {
            args.push("--k3s-arg".to_string());
            args.push(with_node_filters(&arg.arg, &arg.node_filters));
        }

        if self.wait {
            args.push("--wait".to_string());
        }

        if let Some(timeout) = &self.timeout {
            args.push("--timeout".to_string());
            args.push(timeout.clone());
        }

        args
    }
}

/// k3d takes a single `@` per flag, multiple filters are `;`-separated
fn with_node_filters(value: &str, filters: &[String]) -> String {
    if filters.is_empty() {
        value.to_string()
    } else {
        format!("{}@{}", value, filters.join(";"))
    }
}

/// Running cluster as reported by `k3d cluster get/list -o json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,

    #[serde(default)]
    pub servers_count: u32,

    #[serde(default)]
    pub servers_running: u32,

    #[serde(default)]
    pub agents_count: u32,

    #[serde(default)]
    pub agents_running: u32,

    #[serde(default)]
    pub has_loadbalancer: bool,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}
