//! Command-line interface for preflight.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - Turns parsed arguments into a run and an exit code

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::run;
