//! Resolved runtime settings.
//!
//! Precedence, lowest first: built-in defaults, config files, then
//! environment variables and command-line flags (both arrive as
//! [`Overrides`] through clap).

use std::path::{Path, PathBuf};

use crate::checks::MinimumVersion;
use crate::config::schema::PreflightConfig;
use crate::delegate::DiagnosticRoutine;
use crate::error::{PreflightError, Result};

/// Values supplied on the command line or through `PREFLIGHT_*` variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interpreters: Option<Vec<String>>,
    pub min_version: Option<String>,
    pub diagnostic: Option<PathBuf>,
}

/// Everything a run needs, validated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub runtime: String,
    pub candidates: Vec<String>,
    pub minimum: MinimumVersion,
    /// `None` disables the version-query timeout.
    pub version_timeout: Option<u64>,
    pub diagnostic: DiagnosticRoutine,
}

impl Settings {
    /// Apply `overrides` to `config` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidation` for an empty candidate list and
    /// `InvalidVersion` for a malformed minimum version.
    pub fn resolve(
        config: PreflightConfig,
        overrides: &Overrides,
        project_root: &Path,
    ) -> Result<Self> {
        let candidates: Vec<String> = overrides
            .interpreters
            .clone()
            .unwrap_or(config.interpreters)
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if candidates.is_empty() {
            return Err(PreflightError::ConfigValidation {
                message: "at least one interpreter name is required".to_string(),
            });
        }

        let minimum: MinimumVersion = overrides
            .min_version
            .as_deref()
            .unwrap_or(config.min_version.as_str())
            .parse()?;

        let script = overrides
            .diagnostic
            .clone()
            .unwrap_or(config.diagnostic.script);
        let use_interpreter = config.diagnostic.use_interpreter;
        let diagnostic = if use_interpreter {
            DiagnosticRoutine::script(anchor(project_root, script))
        } else if script.components().count() > 1 {
            DiagnosticRoutine::program(anchor(project_root, script))
        } else {
            // A bare program name is looked up on PATH.
            DiagnosticRoutine::program(script)
        };

        let version_timeout = match config.version_timeout_secs {
            0 => None,
            secs => Some(secs),
        };

        Ok(Self {
            runtime: config.runtime,
            candidates,
            minimum,
            version_timeout,
            diagnostic,
        })
    }
}

fn anchor(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagnosticConfig;

    fn root() -> PathBuf {
        PathBuf::from("/project")
    }

    #[test]
    fn defaults_resolve() {
        let settings =
            Settings::resolve(PreflightConfig::default(), &Overrides::default(), &root()).unwrap();

        assert_eq!(settings.candidates, vec!["python3", "python"]);
        assert_eq!(settings.minimum, MinimumVersion::new(3, 10));
        assert_eq!(settings.version_timeout, Some(10));
        assert_eq!(
            settings.diagnostic.path(),
            Path::new("/project/scripts/mcp-health-check.py")
        );
    }

    #[test]
    fn overrides_beat_config() {
        let overrides = Overrides {
            interpreters: Some(vec!["python3.12".into()]),
            min_version: Some("3.12".into()),
            diagnostic: Some(PathBuf::from("/opt/diag.py")),
        };

        let settings =
            Settings::resolve(PreflightConfig::default(), &overrides, &root()).unwrap();

        assert_eq!(settings.candidates, vec!["python3.12"]);
        assert_eq!(settings.minimum, MinimumVersion::new(3, 12));
        assert_eq!(settings.diagnostic.path(), Path::new("/opt/diag.py"));
    }

    #[test]
    fn empty_candidates_rejected() {
        let overrides = Overrides {
            interpreters: Some(vec![" ".into(), String::new()]),
            ..Default::default()
        };

        let err =
            Settings::resolve(PreflightConfig::default(), &overrides, &root()).unwrap_err();

        assert!(matches!(err, PreflightError::ConfigValidation { .. }));
    }

    #[test]
    fn bad_minimum_rejected() {
        let config = PreflightConfig {
            min_version: "ten".into(),
            ..Default::default()
        };

        let err = Settings::resolve(config, &Overrides::default(), &root()).unwrap_err();

        assert!(matches!(err, PreflightError::InvalidVersion { .. }));
    }

    #[test]
    fn zero_timeout_disables() {
        let config = PreflightConfig {
            version_timeout_secs: 0,
            ..Default::default()
        };

        let settings = Settings::resolve(config, &Overrides::default(), &root()).unwrap();

        assert_eq!(settings.version_timeout, None);
    }

    #[test]
    fn bare_program_name_stays_on_path() {
        let config = PreflightConfig {
            diagnostic: DiagnosticConfig {
                script: PathBuf::from("mcp-doctor"),
                use_interpreter: false,
            },
            ..Default::default()
        };

        let settings = Settings::resolve(config, &Overrides::default(), &root()).unwrap();

        assert_eq!(settings.diagnostic, DiagnosticRoutine::program("mcp-doctor"));
    }
}
