//! Interpreter version extraction and minimum-version policy.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PreflightError, Result};
use crate::shell::{execute, CommandOptions};

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

/// A version reported by an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl InterpreterVersion {
    /// Extract the first `<major>.<minor>[.<patch>]` from `--version` output
    /// such as `Python 3.11.2`.
    pub fn parse(output: &str) -> Option<Self> {
        let caps = RE_VERSION.captures(output)?;
        Some(Self {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: match caps.get(3) {
                Some(m) => Some(m.as_str().parse().ok()?),
                None => None,
            },
        })
    }

    /// Whether this version satisfies `minimum`.
    ///
    /// Only major and minor take part; the patch level never fails a check.
    pub fn meets(&self, minimum: &MinimumVersion) -> bool {
        self.major > minimum.major
            || (self.major == minimum.major && self.minor >= minimum.minor)
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// The lowest accepted `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumVersion {
    pub major: u32,
    pub minor: u32,
}

impl MinimumVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for MinimumVersion {
    fn default() -> Self {
        Self::new(3, 10)
    }
}

impl fmt::Display for MinimumVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for MinimumVersion {
    type Err = PreflightError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PreflightError::InvalidVersion {
            value: s.to_string(),
        };
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

/// Ask `interpreter` for its version.
///
/// Both stdout and stderr are searched, since older interpreters print the
/// banner on stderr.
///
/// # Errors
///
/// Returns `VersionQuery` when the interpreter cannot be run, exits non-zero,
/// times out, or prints nothing that looks like a version.
pub fn query_version(interpreter: &Path, timeout: Option<u64>) -> Result<InterpreterVersion> {
    let query_err = |message: String| PreflightError::VersionQuery {
        interpreter: interpreter.to_path_buf(),
        message,
    };

    let result = execute(interpreter, &["--version"], &CommandOptions::captured(timeout))
        .map_err(|e| query_err(e.to_string()))?;

    if result.timed_out {
        return Err(query_err(format!(
            "no response within {} second(s)",
            timeout.unwrap_or_default()
        )));
    }

    if !result.success {
        let detail = result.stderr.trim();
        return Err(query_err(match (result.exit_code, detail.is_empty()) {
            (Some(code), true) => format!("exited with code {}", code),
            (Some(code), false) => format!("exited with code {}: {}", code, detail),
            (None, _) => "terminated by signal".to_string(),
        }));
    }

    let output = result.combined_output();
    tracing::debug!("{} --version printed {:?}", interpreter.display(), output);

    InterpreterVersion::parse(&output).ok_or_else(|| {
        query_err(format!(
            "unrecognised version output '{}'",
            output.trim()
        ))
    })
}

/// Compare `found` against `minimum`.
///
/// # Errors
///
/// Returns `UnsupportedVersion` naming both versions when `found` is too old.
pub fn check_minimum(found: &InterpreterVersion, minimum: &MinimumVersion) -> Result<()> {
    if found.meets(minimum) {
        Ok(())
    } else {
        Err(PreflightError::UnsupportedVersion {
            found: found.to_string(),
            required: minimum.to_string(),
        })
    }
}
