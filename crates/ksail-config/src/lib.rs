//! Configuration for KSail
//!
//! Models the project's `ksail.yaml` and the per-distribution files it
//! points at.
//!
//! # Discovery
//!
//! [`find_config_file`] checks [`CONFIG_PATH_ENV`] first, then looks for
//! `ksail.local.yaml`, `ksail.yaml` or `.ksail.yaml` in the working directory,
//! and finally `ksail.yaml` under [`get_config_dir`].
//!
//! # Loading
//!
//! [`load`] parses the file into a [`LoadedConfig`], falling back to the
//! defaults when no file is found. Distribution configs
//! (`kind.yaml`, `k3d.yaml`, `eks.yaml`) are read with
//! [`load_distribution_config`], which yields `None` for a missing file.
//!
//! ```
//! use std::path::Path;
//!
//! let kind: Option<serde_yaml::Value> =
//!     ksail_config::load_distribution_config(Path::new("no-such-dir/kind.yaml"))?;
//! assert!(kind.is_none());
//! # Ok::<(), ksail_config::ConfigError>(())
//! ```

pub mod error;
pub mod model;

pub use error::*;
pub use model::*;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable pointing directly at a ksail.yaml
pub const CONFIG_PATH_ENV: &str = "KSAIL_CONFIG_PATH";

const CANDIDATES: [&str; 3] = ["ksail.local.yaml", "ksail.yaml", ".ksail.yaml"];

/// Global KSail configuration directory (~/.config/ksail)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ksail"))
}

/// Find the project's ksail.yaml
///
/// Search order:
/// 1. `KSAIL_CONFIG_PATH` environment variable (when the file exists)
/// 2. Current directory: ksail.local.yaml, ksail.yaml, .ksail.yaml
/// 3. ~/.config/ksail/ksail.yaml (global configuration)
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::debug!("{} points at a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    if let Some(config_dir) = get_config_dir() {
        let global_config = config_dir.join("ksail.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// A loaded ksail.yaml together with the directory relative paths resolve against
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: KsailConfig,
    pub root: PathBuf,
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Absolute path of the distribution config file
    pub fn distribution_config_path(&self) -> Result<PathBuf> {
        let path = self.config.spec.distribution_config_path();
        let path = expand_home(&path.to_string_lossy())?;
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.root.join(path))
        }
    }
}

/// Load ksail.yaml from an explicit path, or discover it.
///
/// Without an explicit path and without any discoverable file, the built-in
/// defaults are returned rooted at the current directory.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Ok(path) => path,
            Err(ConfigError::ConfigFileNotFound) => {
                tracing::debug!("No ksail.yaml found, using defaults");
                return Ok(LoadedConfig {
                    config: KsailConfig::default(),
                    root: std::env::current_dir()?,
                    path: None,
                });
            }
            Err(e) => return Err(e),
        },
    };

    let config: KsailConfig = load_yaml(&path)?;
    let root = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.to_path_buf(),
        None => std::env::current_dir()?,
    };

    tracing::debug!("Loaded {} ({} distribution)", path.display(), config.spec.distribution);
    Ok(LoadedConfig {
        config,
        root,
        path: Some(path),
    })
}

/// Parse a YAML file into `T`
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a distribution config; a missing file yields `None`
pub fn load_distribution_config<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        tracing::debug!("Distribution config not found: {}", path.display());
        return Ok(None);
    }
    load_yaml(path).map(Some)
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs::home_dir().ok_or(ConfigError::HomeDirNotFound);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}
