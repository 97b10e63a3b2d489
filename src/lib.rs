//! Preflight - environment checks before detailed MCP server diagnostics.
//!
//! `preflight` makes sure a Python interpreter is on PATH and recent
//! enough, prints one `[PASS]`/`[FAIL]` line per check, and then hands off
//! to the server's health-check script with any extra arguments forwarded.
//!
//! # Modules
//!
//! - [`checks`] - Interpreter lookup, version policy and the check pipeline
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and settings resolution
//! - [`delegate`] - The downstream diagnostic routine
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Process execution
//! - [`ui`] - Check report output
//!
//! # Example
//!
//! ```
//! use preflight::checks::{InterpreterVersion, MinimumVersion};
//!
//! let found = InterpreterVersion::parse("Python 3.11.2").unwrap();
//! assert!(found.meets(&MinimumVersion::default()));
//!
//! let old = InterpreterVersion::parse("Python 3.9.7").unwrap();
//! assert!(!old.meets(&MinimumVersion::new(3, 10)));
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod delegate;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{PreflightError, Result};
