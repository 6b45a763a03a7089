//! Kind provisioner implementation

use crate::config::KindConfig;
use crate::docker::{ContainerClient, DockerClient};
use crate::error::KindError;
use crate::provider::{KindCli, KindProvider};
use async_trait::async_trait;
use ksail_provisioner::{
    BackendContext, ClusterProvisioner, ProvisionerError, Result, resolve_name,
};
use std::fmt;
use std::time::Duration;

/// Budget for starting every node of a cluster
pub const START_TIMEOUT: Duration = Duration::from_secs(30);

/// Budget for stopping every node of a cluster
pub const STOP_TIMEOUT: Duration = Duration::from_secs(60);

/// kind's own default cluster name
const DEFAULT_CLUSTER_NAME: &str = "kind";

#[derive(Debug, Clone, Copy)]
enum NodeAction {
    Start,
    Stop,
}

impl NodeAction {
    fn timeout(self) -> Duration {
        match self {
            NodeAction::Start => START_TIMEOUT,
            NodeAction::Stop => STOP_TIMEOUT,
        }
    }
}

impl fmt::Display for NodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeAction::Start => write!(f, "start"),
            NodeAction::Stop => write!(f, "stop"),
        }
    }
}

/// Kind provisioner
///
/// Create, delete and list go through kind itself. Start and stop are
/// emulated container by container, so an empty node list is the
/// not-found signal.
pub struct KindProvisioner {
    config: KindConfig,
    kubeconfig: String,
    provider: Box<dyn KindProvider>,
    containers: Box<dyn ContainerClient>,
}

impl KindProvisioner {
    pub fn new(
        config: KindConfig,
        kubeconfig: impl Into<String>,
        provider: Box<dyn KindProvider>,
        containers: Box<dyn ContainerClient>,
    ) -> Self {
        Self {
            config,
            kubeconfig: kubeconfig.into(),
            provider,
            containers,
        }
    }

    /// Wire the kind CLI and the local Docker daemon
    pub async fn connect(
        config: KindConfig,
        kubeconfig: impl Into<String>,
    ) -> std::result::Result<Self, KindError> {
        let containers = DockerClient::connect().await?;
        Ok(Self::new(
            config,
            kubeconfig,
            Box::new(KindCli::new()),
            Box::new(containers),
        ))
    }

    pub fn config(&self) -> &KindConfig {
        &self.config
    }

    fn default_name(&self) -> &str {
        self.config
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CLUSTER_NAME)
    }

    /// Node containers of the cluster; none at all means the cluster is gone
    async fn nodes(&self, name: &str) -> Result<Vec<String>> {
        let nodes = self
            .provider
            .list_nodes(name)
            .await
            .backend_context("failed to list nodes")?;

        if nodes.is_empty() {
            return Err(ProvisionerError::ClusterNotFound(name.to_string()));
        }
        Ok(nodes)
    }

    async fn apply_to_nodes(&self, name: &str, action: NodeAction) -> Result<()> {
        self.ensure_exists(name).await?;
        let nodes = self.nodes(name).await?;

        let batch = async {
            for node in &nodes {
                tracing::debug!("Running {} on node {}", action, node);
                let result = match action {
                    NodeAction::Start => self.containers.start_container(node).await,
                    NodeAction::Stop => self.containers.stop_container(node).await,
                };
                result.with_backend_context(|| format!("failed to {} node {}", action, node))?;
            }
            Ok::<(), ProvisionerError>(())
        };

        tokio::time::timeout(action.timeout(), batch)
            .await
            .unwrap_or_else(|_| {
                Err(ProvisionerError::Timeout {
                    operation: format!("{} nodes of kind cluster {}", action, name),
                    timeout: action.timeout(),
                })
            })
    }
}

#[async_trait]
impl ClusterProvisioner for KindProvisioner {
    fn distribution(&self) -> &'static str {
        "kind"
    }

    async fn create(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        tracing::info!("Creating kind cluster {}", name);

        self.provider
            .create(name, &self.config)
            .await
            .backend_context("failed to create kind cluster")
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        let kubeconfig = ksail_config::expand_home(&self.kubeconfig)
            .backend_context("failed to expand kubeconfig path")?;
        tracing::info!("Deleting kind cluster {}", name);

        self.provider
            .delete(name, &kubeconfig)
            .await
            .backend_context("failed to delete kind cluster")
    }

    async fn start(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        tracing::info!("Starting kind cluster {}", name);
        self.apply_to_nodes(name, NodeAction::Start).await
    }

    async fn stop(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        tracing::info!("Stopping kind cluster {}", name);
        self.apply_to_nodes(name, NodeAction::Stop).await
    }

    async fn list(&self) -> Result<Vec<String>> {
        self.provider
            .list()
            .await
            .backend_context("failed to list kind clusters")
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let name = resolve_name(name, self.default_name());
        let clusters = self.list().await?;
        Ok(clusters.iter().any(|c| c == name))
    }
}
