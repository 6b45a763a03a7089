//! Kind provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KindError {
    #[error("kind not found. Please install: brew install kind")]
    KindNotFound,

    #[error("kind command failed: {0}")]
    CommandFailed(String),

    #[error(
        "cannot connect to Docker: {0}\n\nHint:\n  • Check that the Docker daemon is running\n  • Check that `docker ps` works for the current user"
    )]
    DockerConnectionFailed(String),

    #[error("container '{container}' not found")]
    ContainerNotFound { container: String },

    #[error("Docker API error: {0}")]
    DockerApiError(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bollard::errors::Error> for KindError {
    fn from(err: bollard::errors::Error) -> Self {
        match &err {
            bollard::errors::Error::DockerResponseServerError { .. } => {
                // status-specific handling (404, 304) belongs to the caller
                KindError::DockerApiError(err.to_string())
            }
            _ => {
                let err_str = err.to_string();
                if err_str.contains("Connection refused")
                    || err_str.contains("No such file or directory")
                {
                    KindError::DockerConnectionFailed(err_str)
                } else {
                    KindError::DockerApiError(err_str)
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, KindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_map_to_api_error() {
        let err = bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: "driver failed programming external connectivity".to_string(),
        };
        let kind_err: KindError = err.into();
        assert!(matches!(kind_err, KindError::DockerApiError(ref m) if m.contains("driver failed")));
    }
}
