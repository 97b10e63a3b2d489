//! Configuration file discovery and loading.
//!
//! Files are looked up in the project root:
//!
//! 1. `.preflight.yml` (project config)
//! 2. `.preflight.local.yml` (local overrides, usually not committed)
//!
//! Neither is required; without them every setting takes its default.

use crate::config::merger::merge_configs;
use crate::config::schema::PreflightConfig;
use crate::error::{PreflightError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file name.
pub const PROJECT_CONFIG: &str = ".preflight.yml";

/// Local override file name.
pub const LOCAL_CONFIG: &str = ".preflight.local.yml";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .preflight.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .preflight.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let existing = |name: &str| {
            let path = project_root.join(name);
            path.is_file().then_some(path)
        };
        Self {
            project: existing(PROJECT_CONFIG),
            project_local: existing(LOCAL_CONFIG),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

/// Load a config file as a raw YAML value.
///
/// An empty file is treated as an empty mapping.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreflightError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PreflightError::Io(e)
        }
    })?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| PreflightError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(if value.is_null() {
        serde_yaml::Value::Mapping(Default::default())
    } else {
        value
    })
}

/// Load configuration for a project.
///
/// If `config_override` is provided only that file is read; otherwise the
/// discovered files are merged. Missing files fall back to defaults.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PreflightConfig> {
    let (layers, source) = match config_override {
        Some(path) => (vec![load_config_value(path)?], path.to_path_buf()),
        None => {
            let paths = ConfigPaths::discover(project_root);
            let layers = paths
                .all_existing()
                .into_iter()
                .map(|p| load_config_value(p))
                .collect::<Result<Vec<_>>>()?;
            (layers, project_root.join(PROJECT_CONFIG))
        }
    };

    if layers.is_empty() {
        tracing::debug!("No config file in {}; using defaults", project_root.display());
        return Ok(PreflightConfig::default());
    }

    serde_yaml::from_value(merge_configs(&layers)).map_err(|e| PreflightError::ConfigParse {
        path: source,
        message: e.to_string(),
    })
}
