//! Kind provisioner for KSail
//!
//! This crate implements the ClusterProvisioner trait for kind,
//! enabling KSail to manage Kubernetes-in-Docker clusters.
//!
//! # Features
//!
//! - Cluster management (create, delete, list) through the kind CLI
//! - Start/stop emulated by starting and stopping every node container
//!
//! # Requirements
//!
//! - `kind` CLI must be installed
//! - A reachable Docker daemon
//!
//! # Example
//!
//! ```ignore
//! use ksail_provisioner::ClusterProvisioner;
//! use ksail_provisioner_kind::{KindConfig, KindProvisioner};
//!
//! let provisioner = KindProvisioner::connect(KindConfig::default(), "~/.kube/config").await?;
//! provisioner.create("dev").await?;
//! provisioner.stop("dev").await?;
//! ```

pub mod config;
pub mod docker;
pub mod error;
pub mod provider;
pub mod provisioner;

pub use config::{KindConfig, KindNode, Networking, NodeRole, PortMapping};
pub use docker::{ContainerClient, DockerClient};
pub use error::{KindError, Result};
pub use provider::{KindCli, KindProvider};
pub use provisioner::{KindProvisioner, START_TIMEOUT, STOP_TIMEOUT};
