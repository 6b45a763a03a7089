//! Cluster provisioner trait definition

use crate::error::{BackendContext, ProvisionerError, Result};
use async_trait::async_trait;

/// Cluster provisioner abstraction trait
///
/// All distributions (Kind, K3d, EKS) implement this trait to provide a
/// uniform cluster lifecycle. Every operation accepts the requested cluster
/// name; an empty name means "use the name bound in the distribution
/// configuration".
///
/// Operations are not transactional: when a multi-step start or stop fails
/// halfway, the steps that already succeeded are left in place.
#[async_trait]
pub trait ClusterProvisioner: Send + Sync {
    /// Returns the distribution name (e.g., "kind", "k3d", "eks")
    fn distribution(&self) -> &'static str;

    /// Create the cluster
    async fn create(&self, name: &str) -> Result<()>;

    /// Delete the cluster
    async fn delete(&self, name: &str) -> Result<()>;

    /// Start a stopped cluster
    async fn start(&self, name: &str) -> Result<()>;

    /// Stop a running cluster without deleting it
    async fn stop(&self, name: &str) -> Result<()>;

    /// List the names of all clusters known to the backend
    async fn list(&self) -> Result<Vec<String>>;

    /// Check whether the cluster exists in the backend inventory
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Fail with [`ProvisionerError::ClusterNotFound`] unless the cluster exists.
    ///
    /// Start and stop call this before touching any backend state.
    async fn ensure_exists(&self, name: &str) -> Result<()> {
        let exists = self
            .exists(name)
            .await
            .backend_context("failed to check if cluster exists")?;

        if !exists {
            tracing::debug!("Cluster {} is not in the {} inventory", name, self.distribution());
            return Err(ProvisionerError::ClusterNotFound(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::resolve_name;

    struct InventoryProvisioner {
        default_name: String,
        clusters: Option<Vec<String>>,
    }

    #[async_trait]
    impl ClusterProvisioner for InventoryProvisioner {
        fn distribution(&self) -> &'static str {
            "inventory"
        }

        async fn create(&self, _name: &str) -> Result<()> {
            Ok(())
        }

        async fn delete(&self, _name: &str) -> Result<()> {
            Ok(())
        }

        async fn start(&self, name: &str) -> Result<()> {
            self.ensure_exists(resolve_name(name, &self.default_name))
                .await
        }

        async fn stop(&self, name: &str) -> Result<()> {
            self.ensure_exists(resolve_name(name, &self.default_name))
                .await
        }

        async fn list(&self) -> Result<Vec<String>> {
            self.clusters.clone().ok_or_else(|| {
                ProvisionerError::backend(
                    "failed to list clusters",
                    std::io::Error::other("backend unavailable"),
                )
            })
        }

        async fn exists(&self, name: &str) -> Result<bool> {
            let name = resolve_name(name, &self.default_name);
            Ok(self.list().await?.iter().any(|c| c == name))
        }
    }

    fn provisioner(clusters: Option<&[&str]>) -> InventoryProvisioner {
        InventoryProvisioner {
            default_name: "default".to_string(),
            clusters: clusters.map(|c| c.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[tokio::test]
    async fn test_ensure_exists_passes_for_known_cluster() {
        let p = provisioner(Some(&["default", "dev"]));
        assert!(p.start("dev").await.is_ok());
        assert!(p.stop("").await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_exists_reports_not_found() {
        let p = provisioner(Some(&["dev"]));
        let err = p.start("prod").await.unwrap_err();
        assert!(matches!(err, ProvisionerError::ClusterNotFound(ref n) if n == "prod"));
    }

    #[tokio::test]
    async fn test_ensure_exists_wraps_list_failure() {
        let p = provisioner(None);
        let err = p.stop("dev").await.unwrap_err();
        assert!(matches!(err, ProvisionerError::Backend { .. }));
        assert!(
            err.to_string()
                .starts_with("failed to check if cluster exists: failed to list clusters")
        );
        assert!(!err.is_not_found());
    }
}
