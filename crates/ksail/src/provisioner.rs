//! Builds the provisioner matching the configured distribution

use anyhow::Context;
use ksail_config::{Distribution, LoadedConfig};
use ksail_provisioner::ClusterProvisioner;
use ksail_provisioner_eks::EksProvisioner;
use ksail_provisioner_k3d::{K3dProvisioner, SimpleConfig};
use ksail_provisioner_kind::{KindConfig, KindProvisioner};
use std::path::Path;

pub async fn build(loaded: &LoadedConfig) -> anyhow::Result<Box<dyn ClusterProvisioner>> {
    let spec = &loaded.config.spec;
    let cluster_name = loaded.config.metadata.name.as_deref();
    let path = loaded.distribution_config_path()?;
    tracing::debug!(
        "Using {} distribution config {}",
        spec.distribution,
        path.display()
    );

    match spec.distribution {
        Distribution::Kind => {
            let config = load_kind_config(&path, cluster_name)?;
            let provisioner = KindProvisioner::connect(config, spec.connection.kubeconfig.clone())
                .await
                .context("failed to connect to Docker")?;
            Ok(Box::new(provisioner))
        }
        Distribution::K3d => {
            let config = load_k3d_config(&path, cluster_name)?;
            Ok(Box::new(K3dProvisioner::with_cli(config)))
        }
        Distribution::Eks => {
            let config = load_eks_config(&path, cluster_name)?;
            let profile = std::env::var("AWS_PROFILE").ok();
            Ok(Box::new(EksProvisioner::with_eksctl(config, profile)))
        }
    }
}

/// kind.yaml, or the default config when the file is missing
fn load_kind_config(path: &Path, cluster_name: Option<&str>) -> anyhow::Result<KindConfig> {
    let mut config: KindConfig =
        ksail_config::load_distribution_config(path)?.unwrap_or_default();
    apply_kind_name(&mut config, cluster_name);
    Ok(config)
}

/// k3d.yaml, or the default config when the file is missing
fn load_k3d_config(path: &Path, cluster_name: Option<&str>) -> anyhow::Result<SimpleConfig> {
    let mut config: SimpleConfig =
        ksail_config::load_distribution_config(path)?.unwrap_or_default();
    apply_k3d_name(&mut config, cluster_name);
    Ok(config)
}

/// eks.yaml; a missing file stays `None` and is rejected by the provisioner
fn load_eks_config(
    path: &Path,
    cluster_name: Option<&str>,
) -> anyhow::Result<Option<ksail_provisioner_eks::ClusterConfig>> {
    let mut config = ksail_config::load_distribution_config(path)?;
    if let Some(config) = config.as_mut() {
        apply_eks_name(config, cluster_name);
    }
    Ok(config)
}

/// Names set in the distribution config always win over `metadata.name`
fn inject_name(slot: &mut Option<String>, cluster_name: Option<&str>) {
    let unset = slot.as_deref().is_none_or(str::is_empty);
    if let (true, Some(name)) = (unset, cluster_name) {
        *slot = Some(name.to_string());
    }
}

fn apply_kind_name(config: &mut KindConfig, cluster_name: Option<&str>) {
    inject_name(&mut config.name, cluster_name);
}

fn apply_k3d_name(config: &mut SimpleConfig, cluster_name: Option<&str>) {
    inject_name(&mut config.metadata.name, cluster_name);
}

fn apply_eks_name(config: &mut ksail_provisioner_eks::ClusterConfig, cluster_name: Option<&str>) {
    let (Some(metadata), Some(name)) = (config.metadata.as_mut(), cluster_name) else {
        return;
    };
    if metadata.name.is_empty() {
        metadata.name = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksail_provisioner_eks::{ClusterConfig, ClusterMeta};
    use std::fs;

    #[test]
    fn test_kind_name_injected_when_unset() {
        let mut config = KindConfig::default();
        apply_kind_name(&mut config, Some("dev"));
        assert_eq!(config.name.as_deref(), Some("dev"));

        let mut config = KindConfig {
            name: Some(String::new()),
            ..Default::default()
        };
        apply_kind_name(&mut config, Some("dev"));
        assert_eq!(config.name.as_deref(), Some("dev"));
    }

    #[test]
    fn test_kind_name_kept_when_set() {
        let mut config = KindConfig {
            name: Some("from-kind-yaml".to_string()),
            ..Default::default()
        };
        apply_kind_name(&mut config, Some("dev"));
        assert_eq!(config.name.as_deref(), Some("from-kind-yaml"));

        let mut config = KindConfig::default();
        apply_kind_name(&mut config, None);
        assert_eq!(config.name, None);
    }

    #[test]
    fn test_k3d_name_injected_or_kept() {
        let mut config = SimpleConfig::default();
        apply_k3d_name(&mut config, Some("dev"));
        assert_eq!(config.metadata.name.as_deref(), Some("dev"));

        let mut config = SimpleConfig::default();
        config.metadata.name = Some("from-k3d-yaml".to_string());
        apply_k3d_name(&mut config, Some("dev"));
        assert_eq!(config.metadata.name.as_deref(), Some("from-k3d-yaml"));
    }

    #[test]
    fn test_eks_name_injected_or_kept() {
        let mut config = ClusterConfig {
            metadata: Some(ClusterMeta::default()),
            ..Default::default()
        };
        apply_eks_name(&mut config, Some("dev"));
        assert_eq!(config.name(), Some("dev"));

        let mut config = ClusterConfig {
            metadata: Some(ClusterMeta {
                name: "prod".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_eks_name(&mut config, Some("dev"));
        assert_eq!(config.name(), Some("prod"));
    }

    #[test]
    fn test_eks_without_metadata_gets_no_name() {
        let mut config = ClusterConfig::default();
        apply_eks_name(&mut config, Some("dev"));
        assert!(config.metadata.is_none());
    }

    #[test]
    fn test_missing_distribution_configs() {
        let dir = tempfile::tempdir().unwrap();

        let kind = load_kind_config(&dir.path().join("kind.yaml"), Some("dev")).unwrap();
        assert_eq!(kind.name.as_deref(), Some("dev"));
        assert!(kind.nodes.is_empty());

        let k3d = load_k3d_config(&dir.path().join("k3d.yaml"), None).unwrap();
        assert_eq!(k3d, SimpleConfig::default());

        let eks = load_eks_config(&dir.path().join("eks.yaml"), Some("dev")).unwrap();
        assert!(eks.is_none());
    }

    #[test]
    fn test_loaded_kind_config_keeps_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kind.yaml");
        fs::write(
            &path,
            "kind: Cluster\napiVersion: kind.x-k8s.io/v1alpha4\nname: from-file\n",
        )
        .unwrap();

        let config = load_kind_config(&path, Some("dev")).unwrap();
        assert_eq!(config.name.as_deref(), Some("from-file"));
    }
}
