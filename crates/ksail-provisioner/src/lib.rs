//! KSail cluster provisioning
//!
//! This crate provides the backend-agnostic cluster lifecycle contract for
//! KSail, letting command logic create, delete, start, stop and inspect
//! clusters without knowing which distribution backs them.
//!
//! # Supported Distributions
//!
//! - **Kind**: Kubernetes in Docker (via kind CLI + Docker Engine API)
//! - **K3d**: k3s in Docker (via k3d CLI)
//! - **EKS**: Amazon Elastic Kubernetes Service (via eksctl CLI)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    KSail CLI                     │
//! │          (ksail cluster create/start/...)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               ksail-provisioner                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │        Provisioner Abstraction            │   │
//! │  │  trait ClusterProvisioner { ... }         │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Name Policy  │  │    Errors    │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────┬─────────────┬─────────┘
//!         │                 │             │
//! ┌───────▼───────┐ ┌───────▼──────┐ ┌────▼────────┐
//! │     kind      │ │     k3d      │ │     eks     │
//! │  provisioner  │ │ provisioner  │ │ provisioner │
//! └───────────────┘ └──────────────┘ └─────────────┘
//! ```

pub mod error;
pub mod name;
pub mod provisioner;

// Re-exports
pub use error::{BackendContext, BoxError, ProvisionerError, Result};
pub use name::resolve_name;
pub use provisioner::ClusterProvisioner;
