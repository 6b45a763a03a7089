//! ksail.yaml model

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const API_VERSION: &str = "ksail.io/v1alpha1";
pub const KIND: &str = "Cluster";
pub const DEFAULT_KUBECONFIG: &str = "~/.kube/config";

/// Backend technology a cluster runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Distribution {
    /// Kubernetes in Docker
    #[default]
    Kind,
    /// k3s in Docker
    K3d,
    /// Amazon Elastic Kubernetes Service
    #[serde(rename = "EKS")]
    Eks,
}

impl Distribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distribution::Kind => "Kind",
            Distribution::K3d => "K3d",
            Distribution::Eks => "EKS",
        }
    }

    /// Distribution config file used when ksail.yaml does not name one
    pub fn default_config_file(&self) -> &'static str {
        match self {
            Distribution::Kind => "kind.yaml",
            Distribution::K3d => "k3d.yaml",
            Distribution::Eks => "eks.yaml",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distribution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kind" => Ok(Distribution::Kind),
            "k3d" => Ok(Distribution::K3d),
            "eks" => Ok(Distribution::Eks),
            _ => Err(ConfigError::UnknownDistribution(s.to_string())),
        }
    }
}

/// Root of ksail.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KsailConfig {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub spec: Spec,
}

impl Default for KsailConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: Metadata::default(),
            spec: Spec::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Cluster name applied to the distribution config when it has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    #[serde(default)]
    pub distribution: Distribution,

    /// Path to the distribution-native config (kind.yaml, k3d.yaml, eks.yaml)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_config: Option<PathBuf>,

    #[serde(default)]
    pub connection: Connection,
}

impl Spec {
    /// Configured distribution config path, or the distribution's default file
    pub fn distribution_config_path(&self) -> PathBuf {
        self.distribution_config
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.distribution.default_config_file()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Kubeconfig path, `~` is expanded at use
    #[serde(default = "default_kubeconfig")]
    pub kubeconfig: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            kubeconfig: default_kubeconfig(),
            context: None,
        }
    }
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

fn default_kubeconfig() -> String {
    DEFAULT_KUBECONFIG.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
apiVersion: ksail.io/v1alpha1
kind: Cluster
metadata:
  name: dev
spec:
  distribution: EKS
  distributionConfig: clusters/eks.yaml
  connection:
    kubeconfig: ~/.kube/dev
    context: dev-admin
"#;
        let config: KsailConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.metadata.name.as_deref(), Some("dev"));
        assert_eq!(config.spec.distribution, Distribution::Eks);
        assert_eq!(
            config.spec.distribution_config_path(),
            PathBuf::from("clusters/eks.yaml")
        );
        assert_eq!(config.spec.connection.kubeconfig, "~/.kube/dev");
        assert_eq!(config.spec.connection.context.as_deref(), Some("dev-admin"));
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: KsailConfig = serde_yaml::from_str("metadata:\n  name: local\n").unwrap();
        assert_eq!(config.api_version, API_VERSION);
        assert_eq!(config.kind, KIND);
        assert_eq!(config.spec.distribution, Distribution::Kind);
        assert_eq!(config.spec.connection.kubeconfig, DEFAULT_KUBECONFIG);
        assert_eq!(
            config.spec.distribution_config_path(),
            PathBuf::from("kind.yaml")
        );
    }

    #[test]
    fn test_default_config_file_follows_distribution() {
        let mut spec = Spec::default();
        spec.distribution = Distribution::K3d;
        assert_eq!(spec.distribution_config_path(), PathBuf::from("k3d.yaml"));
        spec.distribution = Distribution::Eks;
        assert_eq!(spec.distribution_config_path(), PathBuf::from("eks.yaml"));
    }

    #[test]
    fn test_distribution_from_str() {
        assert_eq!("kind".parse::<Distribution>().unwrap(), Distribution::Kind);
        assert_eq!("K3d".parse::<Distribution>().unwrap(), Distribution::K3d);
        assert_eq!("EKS".parse::<Distribution>().unwrap(), Distribution::Eks);

        let err = "minikube".parse::<Distribution>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDistribution(ref d) if d == "minikube"));
    }

    #[test]
    fn test_distribution_display_matches_yaml() {
        for distribution in [Distribution::Kind, Distribution::K3d, Distribution::Eks] {
            let yaml = serde_yaml::to_string(&distribution).unwrap();
            assert_eq!(yaml.trim(), distribution.to_string());
        }
    }
}
