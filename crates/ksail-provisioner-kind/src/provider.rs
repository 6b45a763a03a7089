//! kind CLI wrapper
//!
//! Wraps the kind CLI commands for cluster-level operations. kind has no
//! native start/stop, see [`crate::docker`] for the node container side.

use crate::config::KindConfig;
use crate::error::{KindError, Result};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Cluster-level operations the kind provisioner depends on
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KindProvider: Send + Sync {
    /// Create a cluster from the given configuration
    async fn create(&self, name: &str, config: &KindConfig) -> Result<()>;

    /// Delete a cluster and remove it from the kubeconfig
    async fn delete(&self, name: &str, kubeconfig: &Path) -> Result<()>;

    /// List cluster names
    async fn list(&self) -> Result<Vec<String>>;

    /// List the node container names of one cluster (empty when unknown)
    async fn list_nodes(&self, name: &str) -> Result<Vec<String>>;
}

/// kind CLI wrapper
pub struct KindCli {
    binary: String,
}

impl KindCli {
    pub fn new() -> Self {
        Self::with_binary("kind")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run a kind command and return stdout
    async fn run_command(&self, args: &[&str], stdin: Option<&str>) -> Result<String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.kill_on_drop(true);

        tracing::debug!("Running: {} {}", self.binary, args.join(" "));

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => KindError::KindNotFound,
            _ => KindError::Io(e),
        })?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KindError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for KindCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KindProvider for KindCli {
    async fn create(&self, name: &str, config: &KindConfig) -> Result<()> {
        let yaml = config.to_yaml()?;
        self.run_command(
            &["create", "cluster", "--name", name, "--config", "-"],
            Some(&yaml),
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, name: &str, kubeconfig: &Path) -> Result<()> {
        let kubeconfig = kubeconfig.to_string_lossy();
        self.run_command(
            &["delete", "cluster", "--name", name, "--kubeconfig", &kubeconfig],
            None,
        )
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        // "No kind clusters found." goes to stderr, stdout stays empty
        let output = self.run_command(&["get", "clusters"], None).await?;
        Ok(parse_lines(&output))
    }

    async fn list_nodes(&self, name: &str) -> Result<Vec<String>> {
        let output = self
            .run_command(&["get", "nodes", "--name", name], None)
            .await?;
        Ok(parse_lines(&output))
    }
}

fn parse_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let output = "ksail-control-plane\nksail-worker\n\n  ksail-worker2  \n";
        assert_eq!(
            parse_lines(output),
            vec!["ksail-control-plane", "ksail-worker", "ksail-worker2"]
        );
        assert!(parse_lines("").is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_reports_kind_not_found() {
        let cli = KindCli::with_binary("kind-binary-that-does-not-exist");
        let err = cli.list().await.unwrap_err();
        assert!(matches!(err, KindError::KindNotFound));
    }
}
