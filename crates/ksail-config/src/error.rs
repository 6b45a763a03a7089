use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("home directory not found")]
    HomeDirNotFound,

    #[error(
        "KSail configuration not found. Looked for:\n\
        - KSAIL_CONFIG_PATH environment variable\n\
        - current directory: ksail.local.yaml, ksail.yaml, .ksail.yaml\n\
        - ~/.config/ksail/ksail.yaml"
    )]
    ConfigFileNotFound,

    #[error("unknown distribution '{0}' (expected one of: Kind, K3d, EKS)")]
    UnknownDistribution(String),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
