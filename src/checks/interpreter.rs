//! Interpreter discovery on the executable search path.
//!
//! Candidates are tried in preference order; for each candidate every PATH
//! directory is scanned in order and the first executable match wins. The
//! `which` command is not used: its behavior varies across systems and it is
//! sometimes a shell builtin.
//!
//! # Example
//!
//! ```no_run
//! use preflight::checks::interpreter::InterpreterLocator;
//!
//! let locator = InterpreterLocator::from_env(vec!["python3".into(), "python".into()]);
//! match locator.locate() {
//!     Ok(found) => println!("{} at {}", found.candidate, found.path.display()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{PreflightError, Result};

/// Default candidate names, in preference order.
pub const DEFAULT_CANDIDATES: &[&str] = &["python3", "python"];

/// An interpreter resolved on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedInterpreter {
    /// The candidate name that matched (e.g. `python3`).
    pub candidate: String,
    /// Full path to the executable.
    pub path: PathBuf,
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// File names to try for `tool` inside one PATH directory.
///
/// On Windows the `PATHEXT` extensions are tried before the bare name, so
/// `python.exe` wins over an extensionless `python` in the same directory.
fn file_names(tool: &str, pathext: Option<&OsString>) -> Vec<OsString> {
    let mut names = Vec::new();
    if cfg!(windows) {
        let exts = pathext
            .and_then(|p| p.to_str())
            .unwrap_or(".COM;.EXE;.BAT;.CMD");
        for ext in exts.split(';').filter(|e| !e.is_empty()) {
            let mut name = OsString::from(tool);
            name.push(ext.to_ascii_lowercase());
            names.push(name);
        }
    }
    names.push(OsString::from(tool));
    names
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let pathext = std::env::var_os("PATHEXT");
    let names = file_names(tool, pathext.as_ref());
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Finds the first available interpreter among an ordered candidate list.
#[derive(Debug, Clone)]
pub struct InterpreterLocator {
    candidates: Vec<String>,
    path_entries: Vec<PathBuf>,
}

impl InterpreterLocator {
    /// Create a locator over explicit PATH entries.
    pub fn new(candidates: Vec<String>, path_entries: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            path_entries,
        }
    }

    /// Create a locator over the process's PATH.
    pub fn from_env(candidates: Vec<String>) -> Self {
        Self::new(candidates, parse_system_path())
    }

    /// Locate the first candidate present on the search path.
    ///
    /// # Errors
    ///
    /// Returns `MissingDependency` if no candidate resolves.
    pub fn locate(&self) -> Result<LocatedInterpreter> {
        for candidate in &self.candidates {
            match resolve_tool_path(candidate, &self.path_entries) {
                Some(path) => {
                    tracing::debug!("Resolved {} to {}", candidate, path.display());
                    return Ok(LocatedInterpreter {
                        candidate: candidate.clone(),
                        path,
                    });
                }
                None => tracing::debug!("{} not found on PATH", candidate),
            }
        }

        Err(PreflightError::MissingDependency {
            candidates: self.candidates.clone(),
        })
    }
}


#[cfg(all(test, windows))]
mod windows_tests {
    use super::*;

    #[test]
    fn pathext_names_come_before_bare_name() {
        let pathext = OsString::from(".EXE;.CMD");
        let names = file_names("python", Some(&pathext));
        assert_eq!(
            names,
            vec![
                OsString::from("python.exe"),
                OsString::from("python.cmd"),
                OsString::from("python"),
            ]
        );
    }
}
