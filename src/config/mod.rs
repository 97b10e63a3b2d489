//! Configuration loading.
//!
//! - [`schema`] - YAML structure of `.preflight.yml`
//! - [`loader`] - File discovery and parsing
//! - [`merger`] - Local override layering
//! - [`settings`] - Defaults, files and flags resolved into one validated value

pub mod loader;
pub mod merger;
pub mod schema;
pub mod settings;

pub use loader::{load_config, ConfigPaths, LOCAL_CONFIG, PROJECT_CONFIG};
pub use schema::{DiagnosticConfig, PreflightConfig};
pub use settings::{Overrides, Settings};
