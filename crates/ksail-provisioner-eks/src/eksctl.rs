//! eksctl CLI wrapper
//!
//! One [`Eksctl`] value implements every capability trait, so the
//! provisioner can be wired from clones of it.

use crate::config::{ClusterConfig, NodeGroup};
use crate::error::{EksError, Result};
use crate::provider::{
    ClusterActions, ClusterCreator, ClusterDescription, ClusterLister, DeleteOptions,
    EksProvider, NodeGroupManager,
};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// eksctl CLI wrapper
#[derive(Debug, Clone)]
pub struct Eksctl {
    binary: String,
    provider: EksProvider,
}

impl Eksctl {
    pub fn new(provider: EksProvider) -> Self {
        Self::with_binary("eksctl", provider)
    }

    pub fn with_binary(binary: impl Into<String>, provider: EksProvider) -> Self {
        Self {
            binary: binary.into(),
            provider,
        }
    }

    /// Cluster-scoped commands always target the provider's region
    fn delete_command(&self, config: &ClusterConfig, options: &DeleteOptions) -> Vec<String> {
        let name = config.name().unwrap_or_default();
        delete_args(name, &self.provider.region, options)
    }

    fn scale_command(
        &self,
        cluster: &str,
        node_group: &NodeGroup,
        wait: bool,
    ) -> Result<Vec<String>> {
        scale_args(cluster, &self.provider.region, node_group, wait)
    }

    /// Run an eksctl command and return stdout
    async fn run_command(&self, args: &[&str], stdin: Option<&str>) -> Result<String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        if let Some(profile) = &self.provider.profile {
            cmd.arg("--profile").arg(profile);
        }
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
            std::io::ErrorKind::NotFound => EksError::EksctlNotFound,
            _ => EksError::Io(e),
        })?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EksError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl ClusterCreator for Eksctl {
    async fn create(&self, config: &ClusterConfig) -> Result<()> {
        let yaml = config.to_yaml()?;
        self.run_command(&["create", "cluster", "-f", "-"], Some(&yaml))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ClusterActions for Eksctl {
    async fn delete(&self, config: &ClusterConfig, options: &DeleteOptions) -> Result<()> {
        let args = self.delete_command(config, options);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_command(&args, None).await?;
        Ok(())
    }
}

#[async_trait]
impl ClusterLister for Eksctl {
    async fn get_clusters(
        &self,
        provider: &EksProvider,
        all_regions: bool,
        chunk_size: u32,
    ) -> Result<Vec<ClusterDescription>> {
        let chunk_size = chunk_size.to_string();
        let mut args = vec!["get", "cluster"];
        if all_regions {
            args.push("--all-regions");
        } else {
            args.push("--region");
            args.push(&provider.region);
        }
        args.extend(["--chunk-size", chunk_size.as_str(), "-o", "json"]);

        let output = self.run_command(&args, None).await?;
        parse_descriptions(&output)
    }
}

#[async_trait]
impl NodeGroupManager for Eksctl {
    async fn scale(&self, cluster: &str, node_group: &NodeGroup, wait: bool) -> Result<()> {
        let args = self.scale_command(cluster, node_group, wait)?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_command(&args, None).await?;
        Ok(())
    }
}

fn delete_args(name: &str, region: &str, options: &DeleteOptions) -> Vec<String> {
    let mut args = vec![
        "delete".to_string(),
        "cluster".to_string(),
        "--name".to_string(),
        name.to_string(),
        "--region".to_string(),
        region.to_string(),
    ];
    if options.wait {
        args.push("--wait".to_string());
    }
    if options.force {
        args.push("--force".to_string());
    }
    if options.disable_nodegroup_eviction {
        args.push("--disable-nodegroup-eviction".to_string());
    }
    args.push("--parallel".to_string());
    args.push(options.parallel.to_string());
    args.push("--pod-eviction-wait-period".to_string());
    args.push(go_duration(options.pod_eviction_wait_period));
    args
}

fn scale_args(
    cluster: &str,
    region: &str,
    node_group: &NodeGroup,
    wait: bool,
) -> Result<Vec<String>> {
    let scaling = node_group.scaling_config.as_ref();
    let desired = scaling
        .and_then(|s| s.desired_capacity)
        .ok_or_else(|| EksError::InvalidNodeGroup(node_group.name.clone()))?;
    let min = scaling.and_then(|s| s.min_size).unwrap_or(desired);

    let mut args = vec![
        "scale".to_string(),
        "nodegroup".to_string(),
        "--cluster".to_string(),
        cluster.to_string(),
        "--region".to_string(),
        region.to_string(),
        "--name".to_string(),
        node_group.name.clone(),
        "--nodes".to_string(),
        desired.to_string(),
        "--nodes-min".to_string(),
        min.to_string(),
    ];
    if let Some(max) = scaling.and_then(|s| s.max_size) {
        args.push("--nodes-max".to_string());
        args.push(max.to_string());
    }
    if wait {
        args.push("--wait".to_string());
    }
    Ok(args)
}

/// Format a duration the way Go's `time.Duration` prints it (e.g., "10m0s")
fn go_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

fn parse_descriptions(output: &str) -> Result<Vec<ClusterDescription>> {
    let output = output.trim();
    if output.is_empty() || output == "[]" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClusterMeta, ScalingConfig};

    #[test]
    fn test_go_duration() {
        assert_eq!(go_duration(Duration::from_secs(600)), "10m0s");
        assert_eq!(go_duration(Duration::from_secs(30)), "30s");
        assert_eq!(go_duration(Duration::from_secs(3725)), "1h2m5s");
    }

    #[test]
    fn test_delete_args_with_defaults() {
        let args = delete_args("prod", "eu-west-1", &DeleteOptions::default());
        assert_eq!(
            args.join(" "),
            "delete cluster --name prod --region eu-west-1 --wait --parallel 4 --pod-eviction-wait-period 10m0s"
        );
    }

    #[test]
    fn test_scale_args() {
        let ng = NodeGroup {
            name: "ng-1".to_string(),
            scaling_config: Some(ScalingConfig {
                desired_capacity: Some(3),
                min_size: Some(1),
                max_size: Some(5),
            }),
            ..Default::default()
        };
        let args = scale_args("prod", "us-west-2", &ng, true).unwrap();
        assert_eq!(
            args.join(" "),
            "scale nodegroup --cluster prod --region us-west-2 --name ng-1 --nodes 3 --nodes-min 1 --nodes-max 5 --wait"
        );
    }

    #[test]
    fn test_scale_args_require_desired_capacity() {
        let ng = NodeGroup {
            name: "ng-1".to_string(),
            ..Default::default()
        };
        let err = scale_args("prod", "us-west-2", &ng, true).unwrap_err();
        assert!(matches!(err, EksError::InvalidNodeGroup(ref n) if n == "ng-1"));
    }

    #[test]
    fn test_delete_and_scale_target_the_same_region() {
        let config = ClusterConfig {
            metadata: Some(ClusterMeta {
                name: "prod".to_string(),
                region: Some("eu-west-1".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let ng = NodeGroup {
            name: "ng-1".to_string(),
            scaling_config: Some(ScalingConfig {
                desired_capacity: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };

        let eksctl = Eksctl::new(EksProvider::from_config(Some(&config)));
        let delete = eksctl.delete_command(&config, &DeleteOptions::default());
        let scale = eksctl.scale_command("prod", &ng, true).unwrap();
        assert_eq!(delete[4..6], ["--region", "eu-west-1"]);
        assert_eq!(scale[4..6], ["--region", "eu-west-1"]);

        // a provider pinned elsewhere wins for both commands
        let eksctl = Eksctl::new(EksProvider::new("ap-northeast-1", None));
        let delete = eksctl.delete_command(&config, &DeleteOptions::default());
        let scale = eksctl.scale_command("prod", &ng, true).unwrap();
        assert_eq!(delete[4..6], ["--region", "ap-northeast-1"]);
        assert_eq!(scale[4..6], ["--region", "ap-northeast-1"]);
    }

    #[test]
    fn test_parse_descriptions() {
        assert!(parse_descriptions("").unwrap().is_empty());
        assert!(parse_descriptions("[]\n").unwrap().is_empty());
        let clusters =
            parse_descriptions(r#"[{"Name":"a","Region":"us-west-2"},{"Name":"b"}]"#).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[1].region, "");
    }

    #[tokio::test]
    async fn test_missing_binary_reports_eksctl_not_found() {
        let eksctl = Eksctl::with_binary("eksctl-binary-that-does-not-exist", EksProvider::default());
        let err = eksctl
            .get_clusters(&EksProvider::default(), false, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, EksError::EksctlNotFound));
    }
}
