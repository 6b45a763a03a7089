//! K3d provisioner for KSail
//!
//! This crate implements the ClusterProvisioner trait for k3d, which runs
//! k3s clusters inside Docker containers.
//!
//! # Requirements
//!
//! - `k3d` CLI must be installed
//! - A reachable Docker daemon (used by k3d itself)
//!
//! # Example
//!
//! ```ignore
//! use ksail_provisioner::ClusterProvisioner;
//! use ksail_provisioner_k3d::{K3dProvisioner, SimpleConfig};
//!
//! let provisioner = K3dProvisioner::with_cli(SimpleConfig::default());
//! provisioner.create("dev").await?;
//! ```

pub mod config;
pub mod error;
pub mod k3d;
pub mod provisioner;
pub mod transform;

pub use config::{
    ArgWithNodeFilters, Cluster, ClusterConfig, KubeApi, Metadata, PortWithNodeFilters,
    Registries, RegistryCreate, SimpleConfig,
};
pub use error::{K3dError, Result};
pub use k3d::{K3dCli, K3dClient};
pub use provisioner::K3dProvisioner;
pub use transform::{ConfigTransformer, SimpleConfigTransformer};
