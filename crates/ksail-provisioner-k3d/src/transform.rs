//! SimpleConfig to ClusterConfig transformation

use crate::config::{ClusterConfig, DEFAULT_CLUSTER_NAME, DEFAULT_IMAGE, SimpleConfig};
use crate::error::{K3dError, Result};
#[cfg(test)]
use mockall::automock;

/// Longest cluster name k3d accepts
const MAX_NAME_LENGTH: usize = 32;

/// Turns a user-facing simple config into a runnable cluster config
#[cfg_attr(test, automock)]
pub trait ConfigTransformer: Send + Sync {
    fn transform(&self, simple: &SimpleConfig) -> Result<ClusterConfig>;
}

/// Applies k3d's defaults and rejects configurations k3d would refuse
#[derive(Debug, Default)]
pub struct SimpleConfigTransformer;

impl ConfigTransformer for SimpleConfigTransformer {
    fn transform(&self, simple: &SimpleConfig) -> Result<ClusterConfig> {
        let name = simple
            .metadata
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_CLUSTER_NAME.to_string());
        validate_name(&name)?;

        let servers = simple.servers.unwrap_or(1);
        if servers == 0 {
            return Err(K3dError::InvalidConfig(
                "a cluster needs at least one server".to_string(),
            ));
        }

        for port in &simple.ports {
            if port.port.trim().is_empty() {
                return Err(K3dError::InvalidConfig("empty port mapping".to_string()));
            }
        }

        let registries = simple.registries.clone().unwrap_or_default();
        if registries.use_registries.iter().any(|r| r.trim().is_empty()) {
            return Err(K3dError::InvalidConfig(
                "empty registry reference".to_string(),
            ));
        }

        Ok(ClusterConfig {
            name,
            servers,
            agents: simple.agents.unwrap_or(0),
            image: simple
                .image
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            kube_api: simple.kube_api.clone(),
            ports: simple.ports.clone(),
            network: simple.network.clone(),
            registries,
            k3s_args: simple.options.k3s.extra_args.clone(),
            wait: simple.options.k3d.wait.unwrap_or(true),
            timeout: simple.options.k3d.timeout.clone(),
        })
    }
}

/// Cluster names end up in container hostnames, so they follow RFC 1123 labels
fn validate_name(name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(K3dError::InvalidConfig(format!(
            "cluster name '{}' is longer than {} characters",
            name, MAX_NAME_LENGTH
        )));
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || name.starts_with('-') || name.ends_with('-') {
        return Err(K3dError::InvalidConfig(format!(
            "cluster name '{}' is not a valid hostname",
            name
        )));
    }
    Ok(())
}
