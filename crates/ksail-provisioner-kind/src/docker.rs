//! Node container lifecycle through the Docker Engine API

use crate::error::{KindError, Result};
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::{StartContainerOptions, StopContainerOptions};
#[cfg(test)]
use mockall::automock;

/// Container start/stop primitives used to emulate cluster start/stop
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContainerClient: Send + Sync {
    /// Start a container; starting a running container is a no-op
    async fn start_container(&self, id: &str) -> Result<()>;

    /// Stop a container; stopping a stopped container is a no-op
    async fn stop_container(&self, id: &str) -> Result<()>;
}

/// bollard-backed [`ContainerClient`]
pub struct DockerClient {
    docker: Docker,
}

impl DockerClient {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Connect with local defaults and make sure the daemon answers
    pub async fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        docker.ping().await?;
        Ok(Self::new(docker))
    }
}

#[async_trait]
impl ContainerClient for DockerClient {
    async fn start_container(&self, id: &str) -> Result<()> {
        match self
            .docker
            .start_container(id, None::<StartContainerOptions>)
            .await
        {
            Ok(_) => Ok(()),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 304, ..
            }) => {
                tracing::debug!("Container {} is already running", id);
                Ok(())
            }
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Err(KindError::ContainerNotFound {
                container: id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn stop_container(&self, id: &str) -> Result<()> {
        match self
            .docker
            .stop_container(id, None::<StopContainerOptions>)
            .await
        {
            Ok(_) => Ok(()),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 304, ..
            }) => {
                tracing::debug!("Container {} is already stopped", id);
                Ok(())
            }
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Err(KindError::ContainerNotFound {
                container: id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
