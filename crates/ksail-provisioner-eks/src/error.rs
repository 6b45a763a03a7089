//! EKS provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EksError {
    #[error("eksctl not found. Please install: brew install eksctl")]
    EksctlNotFound,

    #[error("eksctl command failed: {0}")]
    CommandFailed(String),

    #[error("node group '{0}' has no desired capacity to scale to")]
    InvalidNodeGroup(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EksError>;
