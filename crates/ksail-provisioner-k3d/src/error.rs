//! K3d provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum K3dError {
    #[error("k3d not found. Please install: brew install k3d")]
    K3dNotFound,

    #[error("k3d command failed: {0}")]
    CommandFailed(String),

    #[error("k3d cluster '{0}' not found")]
    ClusterNotFound(String),

    #[error("invalid k3d configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, K3dError>;
