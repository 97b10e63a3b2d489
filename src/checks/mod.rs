//! Preflight checks.
//!
//! This module verifies that a runtime interpreter is available and recent
//! enough before the diagnostic routine runs.
//!
//! # Modules
//!
//! - [`interpreter`] - PATH scanning for interpreter candidates
//! - [`version`] - Version extraction and the minimum-version policy
//! - [`result`] - Check outcome types
//! - [`pipeline`] - Ordered, fail-fast check sequence and hand-off

pub mod interpreter;
pub mod pipeline;
pub mod result;
pub mod version;

pub use interpreter::{InterpreterLocator, LocatedInterpreter, DEFAULT_CANDIDATES};
pub use pipeline::{Preflight, PreflightState, Probe, SystemProbe, PREFLIGHT_FAILURE_EXIT_CODE};
pub use result::{CheckResult, CheckStatus, INTERPRETER_FOUND, VERSION_SUFFICIENT};
pub use version::{InterpreterVersion, MinimumVersion};
