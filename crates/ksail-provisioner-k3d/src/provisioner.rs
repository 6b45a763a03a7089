//! K3d provisioner implementation

use crate::config::{DEFAULT_CLUSTER_NAME, SimpleConfig};
use crate::k3d::{K3dCli, K3dClient};
use crate::transform::{ConfigTransformer, SimpleConfigTransformer};
use async_trait::async_trait;
use ksail_provisioner::{BackendContext, ClusterProvisioner, Result, resolve_name};

/// K3d provisioner
///
/// k3d has native start/stop, so every operation maps to one k3d call.
pub struct K3dProvisioner {
    config: SimpleConfig,
    client: Box<dyn K3dClient>,
    transformer: Box<dyn ConfigTransformer>,
}

impl K3dProvisioner {
    pub fn new(
        config: SimpleConfig,
        client: Box<dyn K3dClient>,
        transformer: Box<dyn ConfigTransformer>,
    ) -> Self {
        Self {
            config,
            client,
            transformer,
        }
    }

    /// Wire the k3d CLI and the default transformer
    pub fn with_cli(config: SimpleConfig) -> Self {
        Self::new(
            config,
            Box::new(K3dCli::new()),
            Box::new(SimpleConfigTransformer),
        )
    }

    pub fn config(&self) -> &SimpleConfig {
        &self.config
    }

    fn default_name(&self) -> &str {
        self.config
            .metadata
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CLUSTER_NAME)
    }
}

#[async_trait]
impl ClusterProvisioner for K3dProvisioner {
    fn distribution(&self) -> &'static str {
        "k3d"
    }

    async fn create(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        tracing::info!("Creating k3d cluster {}", name);

        let mut simple = self.config.clone();
        simple.metadata.name = Some(name.to_string());

        let cluster = self
            .transformer
            .transform(&simple)
            .backend_context("transform simple to cluster config")?;

        self.client
            .cluster_run(&cluster)
            .await
            .backend_context("cluster run")
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        tracing::info!("Deleting k3d cluster {}", name);

        self.client
            .cluster_delete(name)
            .await
            .backend_context("cluster delete")
    }

    async fn start(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        self.ensure_exists(name).await?;
        tracing::info!("Starting k3d cluster {}", name);

        let cluster = self
            .client
            .cluster_get(name)
            .await
            .backend_context("cluster get")?;

        self.client
            .cluster_start(&cluster)
            .await
            .backend_context("cluster start")
    }

    async fn stop(&self, name: &str) -> Result<()> {
        let name = resolve_name(name, self.default_name());
        self.ensure_exists(name).await?;
        tracing::info!("Stopping k3d cluster {}", name);

        let cluster = self
            .client
            .cluster_get(name)
            .await
            .backend_context("cluster get")?;

        self.client
            .cluster_stop(&cluster)
            .await
            .backend_context("cluster stop")
    }

    async fn list(&self) -> Result<Vec<String>> {
        let clusters = self
            .client
            .cluster_list()
            .await
            .backend_context("cluster list")?;
        Ok(clusters.into_iter().map(|c| c.name).collect())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let name = resolve_name(name, self.default_name());
        let clusters = self.list().await?;
        Ok(clusters.iter().any(|c| c == name))
    }
}
