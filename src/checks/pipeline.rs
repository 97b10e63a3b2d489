//! The preflight state machine.
//!
//! ```text
//! Init ──► Checking ──► interpreter-found ──► version-sufficient ──► PassedDelegated
//!                              │                      │
//!                              └──────── FAIL ────────┴──────────► FailedTerminated
//! ```
//!
//! Checks run in a fixed order and the first failure ends the run. Nothing
//! is retried.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use crate::delegate::Delegate;
use crate::error::Result;
use crate::ui::Reporter;

use super::interpreter::{InterpreterLocator, LocatedInterpreter};
use super::result::{CheckResult, INTERPRETER_FOUND, VERSION_SUFFICIENT};
use super::version::{check_minimum, query_version, InterpreterVersion, MinimumVersion};

/// Exit code for a failed preflight check.
pub const PREFLIGHT_FAILURE_EXIT_CODE: i32 = 1;

/// Name reported when the diagnostic routine cannot be started.
pub const DIAGNOSTIC_ROUTINE: &str = "diagnostic-routine";

/// Where the run currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightState {
    Init,
    Checking,
    /// All checks passed and the diagnostic routine ran to completion.
    PassedDelegated { exit_code: i32 },
    /// A check failed; nothing after it was attempted.
    FailedTerminated { check: String },
}

impl PreflightState {
    /// The process exit code for a terminal state.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PassedDelegated { exit_code } => *exit_code,
            Self::FailedTerminated { .. } => PREFLIGHT_FAILURE_EXIT_CODE,
            Self::Init | Self::Checking => PREFLIGHT_FAILURE_EXIT_CODE,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::PassedDelegated { .. } | Self::FailedTerminated { .. }
        )
    }
}

/// Read access to the environment being checked.
pub trait Probe {
    /// Find the interpreter on the search path.
    fn locate(&self) -> Result<LocatedInterpreter>;

    /// Ask the interpreter for its version.
    fn query_version(&self, interpreter: &Path) -> Result<InterpreterVersion>;
}

/// [`Probe`] backed by the real PATH and real processes.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    locator: InterpreterLocator,
    timeout: Option<u64>,
}

impl SystemProbe {
    pub fn new(locator: InterpreterLocator, timeout: Option<u64>) -> Self {
        Self { locator, timeout }
    }
}

impl Probe for SystemProbe {
    fn locate(&self) -> Result<LocatedInterpreter> {
        self.locator.locate()
    }

    fn query_version(&self, interpreter: &Path) -> Result<InterpreterVersion> {
        query_version(interpreter, self.timeout)
    }
}

/// Runs the checks in order, then hands off to the diagnostic routine.
pub struct Preflight<P, D> {
    probe: P,
    delegate: D,
    minimum: MinimumVersion,
    runtime: String,
    state: PreflightState,
}

impl<P: Probe, D: Delegate> Preflight<P, D> {
    /// `runtime` is the human name used in hints (e.g. `Python`).
    pub fn new(
        probe: P,
        delegate: D,
        minimum: MinimumVersion,
        runtime: impl Into<String>,
    ) -> Self {
        Self {
            probe,
            delegate,
            minimum,
            runtime: runtime.into(),
            state: PreflightState::Init,
        }
    }

    pub fn state(&self) -> &PreflightState {
        &self.state
    }

    fn transition(&mut self, next: PreflightState) {
        tracing::debug!("Preflight state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail<W: Write>(
        &mut self,
        reporter: &mut Reporter<W>,
        result: CheckResult,
    ) -> &PreflightState {
        tracing::debug!("Check '{}' failed: {}", result.name, result.message);
        reporter.report(&result);
        reporter.flush();
        self.transition(PreflightState::FailedTerminated { check: result.name });
        &self.state
    }

    fn install_hint(&self) -> String {
        format!(
            "Install {} {} or later and make sure it is on PATH",
            self.runtime, self.minimum
        )
    }

    /// Run every check, then the diagnostic routine with `args` forwarded
    /// unchanged. Returns the terminal state.
    pub fn run<W: Write>(
        &mut self,
        args: &[OsString],
        reporter: &mut Reporter<W>,
    ) -> &PreflightState {
        if self.state.is_terminal() {
            return &self.state;
        }
        self.transition(PreflightState::Checking);

        let interpreter = match self.probe.locate() {
            Ok(found) => found,
            Err(e) => {
                let hint = self.install_hint();
                let result = CheckResult::fail(INTERPRETER_FOUND, e.to_string(), hint);
                return self.fail(reporter, result);
            }
        };
        reporter.report(&CheckResult::pass(
            INTERPRETER_FOUND,
            format!("{} at {}", interpreter.candidate, interpreter.path.display()),
        ));

        let version = match self.probe.query_version(&interpreter.path) {
            Ok(version) => version,
            Err(e) => {
                let hint = format!(
                    "Check that '{} --version' runs and prints a {} version",
                    interpreter.path.display(),
                    self.runtime
                );
                let result = CheckResult::fail(VERSION_SUFFICIENT, e.to_string(), hint);
                return self.fail(reporter, result);
            }
        };
        if let Err(e) = check_minimum(&version, &self.minimum) {
            let hint = self.install_hint();
            let result = CheckResult::fail(VERSION_SUFFICIENT, e.to_string(), hint);
            return self.fail(reporter, result);
        }
        reporter.report(&CheckResult::pass(
            VERSION_SUFFICIENT,
            format!("{} {} (requires {}+)", self.runtime, version, self.minimum),
        ));
        reporter.flush();

        tracing::debug!("All checks passed; forwarding {:?}", args);
        match self.delegate.run(&interpreter, args) {
            Ok(exit_code) => {
                if exit_code != 0 {
                    tracing::debug!("Diagnostic routine exited with code {}", exit_code);
                }
                self.transition(PreflightState::PassedDelegated { exit_code });
            }
            Err(e) => {
                let hint = "Check the diagnostic routine path (--diagnostic or diagnostic.script)";
                let result = CheckResult::fail(DIAGNOSTIC_ROUTINE, e.to_string(), hint);
                return self.fail(reporter, result);
            }
        }

        &self.state
    }
}
