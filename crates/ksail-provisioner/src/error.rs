//! Provisioner error types

use std::time::Duration;
use thiserror::Error;

/// Boxed error coming from a backend SDK or CLI wrapper
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by every [`ClusterProvisioner`](crate::ClusterProvisioner)
#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("invalid cluster configuration: cluster config or its metadata is missing")]
    InvalidClusterConfig,

    #[error("cluster name is empty")]
    EmptyClusterName,

    #[error("{operation} timed out after {}s", .timeout.as_secs())]
    Timeout {
        operation: String,
        timeout: Duration,
    },

    #[error("{context}: {source}")]
    Backend {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl ProvisionerError {
    /// Wrap a backend failure with a short, call-specific prefix
    pub fn backend(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Backend {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Whether this error, or any provisioner error it wraps, is a not-found
    pub fn is_not_found(&self) -> bool {
        match self {
            ProvisionerError::ClusterNotFound(_) => true,
            ProvisionerError::Backend { source, .. } => source
                .downcast_ref::<ProvisionerError>()
                .is_some_and(ProvisionerError::is_not_found),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionerError>;

/// Attach a backend context to any error result
pub trait BackendContext<T> {
    fn backend_context(self, context: &str) -> Result<T>;

    fn with_backend_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> BackendContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn backend_context(self, context: &str) -> Result<T> {
        self.map_err(|e| ProvisionerError::backend(context, e))
    }

    fn with_backend_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| ProvisionerError::backend(f(), e))
    }
}
