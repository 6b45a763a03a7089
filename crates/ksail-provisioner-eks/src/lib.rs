//! Amazon EKS provisioner for KSail
//!
//! This crate implements the ClusterProvisioner trait for EKS. Cluster
//! lifecycle goes through eksctl; start and stop are emulated by scaling
//! node groups.
//!
//! # Requirements
//!
//! - `eksctl` CLI must be installed
//! - AWS credentials (environment, shared config, or `--profile`)

pub mod config;
pub mod eksctl;
pub mod error;
pub mod provider;
pub mod provisioner;

pub use config::{ClusterConfig, ClusterMeta, NodeGroup, ScalingConfig};
pub use eksctl::Eksctl;
pub use error::{EksError, Result};
pub use provider::{
    ClusterActions, ClusterCreator, ClusterDescription, ClusterLister, DEFAULT_REGION,
    DeleteOptions, EksProvider, NodeGroupManager,
};
pub use provisioner::{
    DEFAULT_CLUSTER_NAME, EksProvisioner, prepare_scale_down, prepare_scale_up,
};
