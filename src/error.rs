//! Error types for preflight operations.
//!
//! This module defines [`PreflightError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Check failures become [`PreflightError`] values inside the checks and are
//!   rendered by the pipeline as `[FAIL]` lines, never bubbled to `main`
//! - Configuration problems propagate to `main` and end the run with exit code 1

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for preflight operations.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// No interpreter candidate was found on the search path.
    #[error("No interpreter found on PATH (tried: {})", candidates.join(", "))]
    MissingDependency { candidates: Vec<String> },

    /// The interpreter could not report a usable version.
    #[error("Could not determine version of {}: {message}", interpreter.display())]
    VersionQuery {
        interpreter: PathBuf,
        message: String,
    },

    /// The interpreter is older than the required minimum.
    #[error("Version {found} is older than required {required}")]
    UnsupportedVersion { found: String, required: String },

    /// The diagnostic routine could not be started.
    #[error("Could not run diagnostic routine '{command}': {message}")]
    DelegationFailure { command: String, message: String },

    /// A version requirement could not be parsed.
    #[error("Invalid version '{value}': expected <major>.<minor>")]
    InvalidVersion { value: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, PreflightError>;
