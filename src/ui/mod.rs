//! Terminal output for the check report.
//!
//! - [`Reporter`] prints `[PASS]`/`[FAIL]` lines and remediation hints
//! - [`PreflightTheme`] holds the marker styles

pub mod report;
pub mod theme;

pub use report::Reporter;
pub use theme::{should_use_colors, PreflightTheme};
