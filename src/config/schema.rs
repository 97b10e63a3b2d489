//! Configuration schema types.
//!
//! These types map directly to the YAML structure of `.preflight.yml`.
//! Every field is optional; missing fields take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::checks::DEFAULT_CANDIDATES;
use crate::delegate::DEFAULT_DIAGNOSTIC_SCRIPT;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreflightConfig {
    /// Human name of the runtime, used in hints.
    pub runtime: String,

    /// Interpreter names to look for, most preferred first.
    pub interpreters: Vec<String>,

    /// Lowest accepted `major.minor`.
    pub min_version: String,

    /// Seconds to wait for `--version` (0 disables the timeout).
    pub version_timeout_secs: u64,

    /// The routine run once all checks pass.
    pub diagnostic: DiagnosticConfig,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            runtime: "Python".to_string(),
            interpreters: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            min_version: "3.10".to_string(),
            version_timeout_secs: 10,
            diagnostic: DiagnosticConfig::default(),
        }
    }
}

/// Diagnostic routine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticConfig {
    /// Path to the routine, relative paths resolve against the project root.
    pub script: PathBuf,

    /// Run `script` with the located interpreter rather than directly.
    pub use_interpreter: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from(DEFAULT_DIAGNOSTIC_SCRIPT),
            use_interpreter: true,
        }
    }
}
