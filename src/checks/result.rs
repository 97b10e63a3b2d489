//! Check outcome types.
//!
//! Each preflight check produces a [`CheckResult`] that the reporter prints
//! immediately and then drops.

use std::fmt;

/// Identifier of the interpreter lookup check.
pub const INTERPRETER_FOUND: &str = "interpreter-found";

/// Identifier of the minimum version check.
pub const VERSION_SUFFICIENT: &str = "version-sufficient";

/// Pass/fail status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    /// Bracketed marker printed at the start of a report line.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Pass => "[PASS]",
            Self::Fail => "[FAIL]",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// The outcome of one preflight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Stable identifier (e.g. `interpreter-found`).
    pub name: String,
    /// Whether the check passed.
    pub status: CheckStatus,
    /// Human-readable detail.
    pub message: String,
    /// What the user should do about a failure.
    pub remediation: Option<String>,
}

impl CheckResult {
    /// Create a passing result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pass,
            message: message.into(),
            remediation: None,
        }
    }

    /// Create a failing result with a remediation hint.
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Fail,
            message: message.into(),
            remediation: Some(remediation.into()),
        }
    }

    /// The text following the marker: `<name>: <message>`.
    pub fn description(&self) -> String {
        format!("{}: {}", self.name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_has_no_remediation() {
        let result = CheckResult::pass(INTERPRETER_FOUND, "python3 at /usr/bin/python3");
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.remediation, None);
    }

    #[test]
    fn fail_keeps_remediation() {
        let result = CheckResult::fail(VERSION_SUFFICIENT, "too old", "Install Python 3.10");
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.remediation.as_deref(), Some("Install Python 3.10"));
    }

    #[test]
    fn description_joins_name_and_message() {
        let result = CheckResult::pass(VERSION_SUFFICIENT, "Python 3.11.2");
        assert_eq!(result.description(), "version-sufficient: Python 3.11.2");
    }

    #[test]
    fn status_markers() {
        assert_eq!(CheckStatus::Pass.to_string(), "[PASS]");
        assert_eq!(CheckStatus::Fail.to_string(), "[FAIL]");
    }
}
