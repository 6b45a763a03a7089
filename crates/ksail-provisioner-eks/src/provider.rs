//! Capabilities the EKS provisioner is built from

use crate::config::{ClusterConfig, NodeGroup};
use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-west-2";

/// AWS account/region handle used for inventory queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EksProvider {
    pub region: String,
    pub profile: Option<String>,
}

impl EksProvider {
    pub fn new(region: impl Into<String>, profile: Option<String>) -> Self {
        Self {
            region: region.into(),
            profile,
        }
    }

    /// Region from the cluster metadata, falling back to [`DEFAULT_REGION`]
    pub fn from_config(config: Option<&ClusterConfig>) -> Self {
        let region = config
            .and_then(ClusterConfig::region)
            .unwrap_or(DEFAULT_REGION);
        Self::new(region, None)
    }
}

impl Default for EksProvider {
    fn default() -> Self {
        Self::new(DEFAULT_REGION, None)
    }
}

/// Options for cluster deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Poll interval while waiting for CloudFormation stacks
    pub wait_interval: Duration,
    pub pod_eviction_wait_period: Duration,
    pub wait: bool,
    pub force: bool,
    pub disable_nodegroup_eviction: bool,
    /// Node groups deleted concurrently
    pub parallel: u32,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self {
            wait_interval: Duration::from_secs(30),
            pod_eviction_wait_period: Duration::from_secs(10 * 60),
            wait: true,
            force: false,
            disable_nodegroup_eviction: false,
            parallel: 4,
        }
    }
}

/// One row of `eksctl get cluster -o json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDescription {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Region", default)]
    pub region: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterCreator: Send + Sync {
    async fn create(&self, config: &ClusterConfig) -> Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterActions: Send + Sync {
    async fn delete(&self, config: &ClusterConfig, options: &DeleteOptions) -> Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterLister: Send + Sync {
    async fn get_clusters(
        &self,
        provider: &EksProvider,
        all_regions: bool,
        chunk_size: u32,
    ) -> Result<Vec<ClusterDescription>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait NodeGroupManager: Send + Sync {
    /// Scale a node group to its scaling config
    async fn scale(&self, cluster: &str, node_group: &NodeGroup, wait: bool) -> Result<()>;
}
