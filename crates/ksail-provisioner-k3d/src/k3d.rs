//! k3d CLI wrapper

use crate::config::{Cluster, ClusterConfig};
use crate::error::{K3dError, Result};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::process::Stdio;
use tokio::process::Command;

/// Cluster operations the k3d provisioner depends on
#[cfg_attr(test, automock)]
#[async_trait]
pub trait K3dClient: Send + Sync {
    /// Create and start a cluster
    async fn cluster_run(&self, config: &ClusterConfig) -> Result<()>;

    async fn cluster_delete(&self, name: &str) -> Result<()>;

    /// Look up one cluster by name
    async fn cluster_get(&self, name: &str) -> Result<Cluster>;

    async fn cluster_start(&self, cluster: &Cluster) -> Result<()>;

    async fn cluster_stop(&self, cluster: &Cluster) -> Result<()>;

    async fn cluster_list(&self) -> Result<Vec<Cluster>>;
}

/// k3d CLI wrapper
pub struct K3dCli {
    binary: String,
}

impl K3dCli {
    pub fn new() -> Self {
        Self::with_binary("k3d")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run a k3d command and return stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("Running: {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => K3dError::K3dNotFound,
                _ => K3dError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(K3dError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for K3dCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl K3dClient for K3dCli {
    async fn cluster_run(&self, config: &ClusterConfig) -> Result<()> {
        let args = config.to_create_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_command(&args).await?;
        Ok(())
    }

    async fn cluster_delete(&self, name: &str) -> Result<()> {
        self.run_command(&["cluster", "delete", name]).await?;
        Ok(())
    }

    async fn cluster_get(&self, name: &str) -> Result<Cluster> {
        let output = self
            .run_command(&["cluster", "get", name, "-o", "json"])
            .await?;
        parse_clusters(&output)?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| K3dError::ClusterNotFound(name.to_string()))
    }

    async fn cluster_start(&self, cluster: &Cluster) -> Result<()> {
        self.run_command(&["cluster", "start", &cluster.name]).await?;
        Ok(())
    }

    async fn cluster_stop(&self, cluster: &Cluster) -> Result<()> {
        self.run_command(&["cluster", "stop", &cluster.name]).await?;
        Ok(())
    }

    async fn cluster_list(&self) -> Result<Vec<Cluster>> {
        let output = self.run_command(&["cluster", "list", "-o", "json"]).await?;
        parse_clusters(&output)
    }
}

/// k3d prints nothing at all instead of `[]` on some versions
fn parse_clusters(output: &str) -> Result<Vec<Cluster>> {
    let output = output.trim();
    if output.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clusters() {
        assert!(parse_clusters("").unwrap().is_empty());
        assert!(parse_clusters("[]\n").unwrap().is_empty());

        let clusters = parse_clusters(r#"[{"name":"a"},{"name":"b","serversCount":1}]"#).unwrap();
        let names: Vec<_> = clusters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_clusters_rejects_garbage() {
        assert!(matches!(
            parse_clusters("FATA[0000] no clusters"),
            Err(K3dError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_reports_k3d_not_found() {
        let cli = K3dCli::with_binary("k3d-binary-that-does-not-exist");
        let err = cli.cluster_list().await.unwrap_err();
        assert!(matches!(err, K3dError::K3dNotFound));
    }
}
