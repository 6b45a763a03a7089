//! EKS provisioner implementation

use crate::config::{ClusterConfig, NodeGroup, ScalingConfig};
use crate::eksctl::Eksctl;
use crate::provider::{
    ClusterActions, ClusterCreator, ClusterLister, DeleteOptions, EksProvider, NodeGroupManager,
};
use async_trait::async_trait;
use ksail_provisioner::{
    BackendContext, ClusterProvisioner, ProvisionerError, Result, resolve_name,
};
use tokio::sync::Mutex;

/// Name checked by `exists` when neither the caller nor the config names a cluster
pub const DEFAULT_CLUSTER_NAME: &str = "ksail-default";

/// Chunk size for cluster inventory queries
const LIST_CHUNK_SIZE: u32 = 100;

/// EKS provisioner
///
/// EKS has no start/stop, so they are emulated by scaling node groups up to
/// their configured size and down to zero. The bound configuration is
/// rewritten in the process (resolved name, adjusted sizes) and stays locked
/// for the duration of each operation.
pub struct EksProvisioner {
    config: Mutex<Option<ClusterConfig>>,
    provider: EksProvider,
    creator: Box<dyn ClusterCreator>,
    actions: Box<dyn ClusterActions>,
    lister: Box<dyn ClusterLister>,
    node_groups: Box<dyn NodeGroupManager>,
}

impl EksProvisioner {
    pub fn new(
        config: Option<ClusterConfig>,
        provider: EksProvider,
        creator: Box<dyn ClusterCreator>,
        actions: Box<dyn ClusterActions>,
        lister: Box<dyn ClusterLister>,
        node_groups: Box<dyn NodeGroupManager>,
    ) -> Self {
        Self {
            config: Mutex::new(config),
            provider,
            creator,
            actions,
            lister,
            node_groups,
        }
    }

    /// Wire every capability to eksctl
    pub fn with_eksctl(config: Option<ClusterConfig>, profile: Option<String>) -> Self {
        let mut provider = EksProvider::from_config(config.as_ref());
        provider.profile = profile;
        let eksctl = Eksctl::new(provider.clone());

        Self::new(
            config,
            provider,
            Box::new(eksctl.clone()),
            Box::new(eksctl.clone()),
            Box::new(eksctl.clone()),
            Box::new(eksctl),
        )
    }

    pub fn provider(&self) -> &EksProvider {
        &self.provider
    }

    /// Snapshot of the bound configuration
    pub async fn cluster_config(&self) -> Option<ClusterConfig> {
        self.config.lock().await.clone()
    }

    /// Requested name, then the configured one, then [`DEFAULT_CLUSTER_NAME`]
    async fn target_name(&self, name: &str) -> String {
        let configured = self
            .config
            .lock()
            .await
            .as_ref()
            .and_then(|c| c.name().map(String::from))
            .unwrap_or_default();
        match resolve_name(name, &configured) {
            "" => DEFAULT_CLUSTER_NAME.to_string(),
            resolved => resolved.to_string(),
        }
    }
}

/// Validate the bound configuration and bind the resolved name into it
fn setup_cluster_operation<'a>(
    config: &'a mut Option<ClusterConfig>,
    name: &str,
) -> Result<(String, &'a mut ClusterConfig)> {
    let config = config
        .as_mut()
        .ok_or(ProvisionerError::InvalidClusterConfig)?;
    let metadata = config
        .metadata
        .as_mut()
        .ok_or(ProvisionerError::InvalidClusterConfig)?;

    let target = resolve_name(name, &metadata.name).to_string();
    if target.is_empty() {
        return Err(ProvisionerError::EmptyClusterName);
    }
    metadata.name = target.clone();

    Ok((target, config))
}

/// Prepare a node group for scale-up; `false` means there is nothing to scale to
pub fn prepare_scale_up(node_group: &mut NodeGroup) -> bool {
    let Some(scaling) = node_group.scaling_config.as_mut() else {
        return false;
    };
    let Some(desired) = scaling.desired_capacity else {
        return false;
    };
    if scaling.min_size == Some(0) {
        scaling.min_size = Some(desired);
    }
    true
}

/// Size a node group down to zero, allocating a scaling config if needed
pub fn prepare_scale_down(node_group: &mut NodeGroup) {
    let scaling = node_group
        .scaling_config
        .get_or_insert_with(ScalingConfig::default);
    scaling.desired_capacity = Some(0);
    scaling.min_size = Some(0);
}

#[async_trait]
impl ClusterProvisioner for EksProvisioner {
    fn distribution(&self) -> &'static str {
        "eks"
    }

    async fn create(&self, name: &str) -> Result<()> {
        let mut guard = self.config.lock().await;
        let (target, config) = setup_cluster_operation(&mut guard, name)?;
        tracing::info!("Creating EKS cluster {}", target);

        self.creator
            .create(config)
            .await
            .backend_context("failed to create EKS cluster")
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let mut guard = self.config.lock().await;
        let (target, config) = setup_cluster_operation(&mut guard, name)?;
        tracing::info!("Deleting EKS cluster {}", target);

        self.actions
            .delete(config, &DeleteOptions::default())
            .await
            .backend_context("failed to delete EKS cluster")
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.ensure_exists(&self.target_name(name).await).await?;

        let mut guard = self.config.lock().await;
        let (target, config) = setup_cluster_operation(&mut guard, name)?;
        tracing::info!("Starting EKS cluster {}", target);

        for node_group in config.node_groups.iter_mut() {
            if !prepare_scale_up(node_group) {
                tracing::warn!(
                    "Skipping node group {}: no desired capacity configured",
                    node_group.name
                );
                continue;
            }
            tracing::debug!("Scaling up node group {}", node_group.name);
            self.node_groups
                .scale(&target, node_group, true)
                .await
                .with_backend_context(|| {
                    format!("failed to scale node group {}", node_group.name)
                })?;
        }
        Ok(())
    }

    async fn stop(&self, name: &str) -> Result<()> {
        self.ensure_exists(&self.target_name(name).await).await?;

        let mut guard = self.config.lock().await;
        let (target, config) = setup_cluster_operation(&mut guard, name)?;
        tracing::info!("Stopping EKS cluster {}", target);

        for node_group in config.node_groups.iter_mut() {
            prepare_scale_down(node_group);
            tracing::debug!("Scaling down node group {}", node_group.name);
            self.node_groups
                .scale(&target, node_group, true)
                .await
                .with_backend_context(|| {
                    format!("failed to scale down node group {}", node_group.name)
                })?;
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let clusters = self
            .lister
            .get_clusters(&self.provider, false, LIST_CHUNK_SIZE)
            .await
            .backend_context("failed to list EKS clusters")?;
        Ok(clusters.into_iter().map(|c| c.name).collect())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let target = self.target_name(name).await;
        let clusters = self.list().await.backend_context("failed to list clusters")?;
        Ok(clusters.iter().any(|c| *c == target))
    }
}
