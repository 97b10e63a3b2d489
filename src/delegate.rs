//! Hand-off to the detailed diagnostic routine.
//!
//! Once every check passes, the diagnostic routine runs with stdio inherited
//! so its report follows the check lines. Arguments given to `preflight` are
//! appended unchanged and the routine's exit code becomes ours.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::checks::LocatedInterpreter;
use crate::error::{PreflightError, Result};
use crate::shell::{execute, CommandOptions};

/// Script run by default, relative to the project root.
pub const DEFAULT_DIAGNOSTIC_SCRIPT: &str = "scripts/mcp-health-check.py";

/// Exit code used when the routine ends without one (killed by a signal),
/// or with one that cannot be a process exit status.
pub const ABNORMAL_EXIT_CODE: i32 = 1;

/// Something that runs after the checks pass.
pub trait Delegate {
    /// Run with `args` forwarded verbatim and return the exit code.
    ///
    /// # Errors
    ///
    /// Returns `DelegationFailure` only if the routine could not be started;
    /// a non-zero exit is returned as `Ok(code)`.
    fn run(&self, interpreter: &LocatedInterpreter, args: &[OsString]) -> Result<i32>;
}

/// The downstream diagnostic routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRoutine {
    program: PathBuf,
    use_interpreter: bool,
}

impl DiagnosticRoutine {
    /// A script executed by the located interpreter.
    pub fn script(path: impl Into<PathBuf>) -> Self {
        Self {
            program: path.into(),
            use_interpreter: true,
        }
    }

    /// A standalone executable run directly.
    pub fn program(path: impl Into<PathBuf>) -> Self {
        Self {
            program: path.into(),
            use_interpreter: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.program
    }

    /// The program to spawn and its full argument list.
    pub fn command_line(
        &self,
        interpreter: &LocatedInterpreter,
        args: &[OsString],
    ) -> (PathBuf, Vec<OsString>) {
        let forwarded = args.iter().cloned();
        if self.use_interpreter {
            let argv = std::iter::once(self.program.clone().into_os_string())
                .chain(forwarded)
                .collect();
            (interpreter.path.clone(), argv)
        } else {
            (self.program.clone(), forwarded.collect())
        }
    }
}

impl Delegate for DiagnosticRoutine {
    fn run(&self, interpreter: &LocatedInterpreter, args: &[OsString]) -> Result<i32> {
        let command = self.program.display().to_string();

        if self.use_interpreter && !self.program.is_file() {
            return Err(PreflightError::DelegationFailure {
                command,
                message: "script not found".to_string(),
            });
        }

        let (program, argv) = self.command_line(interpreter, args);
        tracing::debug!("Delegating to {} {:?}", program.display(), argv);

        let result = execute(&program, argv.as_slice(), &CommandOptions::default())
            .map_err(|e| PreflightError::DelegationFailure {
                command: command.clone(),
                message: e.to_string(),
            })?;

        Ok(match result.exit_code {
            Some(code) => code,
            None => {
                tracing::warn!("{} was terminated by a signal", command);
                ABNORMAL_EXIT_CODE
            }
        })
    }
}

/// Map an exit code onto the `0..=255` range a process can return.
///
/// Codes outside that range become [`ABNORMAL_EXIT_CODE`] rather than being
/// truncated, so a failure can never wrap around to success.
pub fn process_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(ABNORMAL_EXIT_CODE as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python() -> LocatedInterpreter {
        LocatedInterpreter {
            candidate: "python3".into(),
            path: PathBuf::from("/usr/bin/python3"),
        }
    }

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn script_runs_through_interpreter() {
        let routine = DiagnosticRoutine::script("scripts/mcp-health-check.py");
        let (program, argv) = routine.command_line(&python(), &args(&["--verbose"]));

        assert_eq!(program, PathBuf::from("/usr/bin/python3"));
        assert_eq!(
            argv,
            vec![
                OsString::from("scripts/mcp-health-check.py"),
                OsString::from("--verbose")
            ]
        );
    }

    #[test]
    fn program_runs_directly() {
        let routine = DiagnosticRoutine::program("/opt/diag");
        let (program, argv) = routine.command_line(&python(), &args(&["-v", "x y"]));

        assert_eq!(program, PathBuf::from("/opt/diag"));
        assert_eq!(argv, vec![OsString::from("-v"), OsString::from("x y")]);
    }

    #[test]
    fn missing_script_is_delegation_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let routine = DiagnosticRoutine::script(temp.path().join("absent.py"));

        let err = routine.run(&python(), &[]).unwrap_err();

        assert!(matches!(err, PreflightError::DelegationFailure { .. }));
        assert!(err.to_string().contains("script not found"));
    }

    #[test]
    fn exit_codes_clamp_to_failure() {
        assert_eq!(process_exit_code(0), 0);
        assert_eq!(process_exit_code(2), 2);
        assert_eq!(process_exit_code(255), 255);
        assert_eq!(process_exit_code(256), 1);
        assert_eq!(process_exit_code(-1), 1);
    }

    #[cfg(unix)]
    #[test]
    fn program_exit_code_is_returned() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("diag");
        fs::write(&path, "#!/bin/sh\nexit 7\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let code = DiagnosticRoutine::program(&path).run(&python(), &[]).unwrap();

        assert_eq!(code, 7);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_argument_is_forwarded_as_bytes() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let raw = OsString::from_vec(vec![b'-', b'-', 0xff]);
        let routine = DiagnosticRoutine::script("scripts/mcp-health-check.py");
        let (_, argv) = routine.command_line(&python(), &[raw]);

        assert_eq!(argv[1].as_bytes(), &[b'-', b'-', 0xff]);
    }
}
