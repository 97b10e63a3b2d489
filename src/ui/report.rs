//! Check report output.
//!
//! One line per check:
//!
//! ```text
//! [PASS] interpreter-found: python3 at /usr/bin/python3
//! [FAIL] version-sufficient: Version 3.9.7 is older than required 3.10
//!        Fix: Install Python 3.10 or later
//! ```

use std::io::{self, Write};

use crate::checks::{CheckResult, CheckStatus};

use super::theme::PreflightTheme;

/// Indentation that lines a hint up under the description.
const HINT_INDENT: &str = "       ";

/// Prints check results as they are produced.
#[derive(Debug)]
pub struct Reporter<W: Write = io::Stdout> {
    out: W,
    theme: PreflightTheme,
}

impl Reporter<io::Stdout> {
    /// Report to the process's stdout.
    pub fn stdout(theme: PreflightTheme) -> Self {
        Self::new(io::stdout(), theme)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, theme: PreflightTheme) -> Self {
        Self { out, theme }
    }

    /// Print one result, plus its remediation hint when it failed.
    pub fn report(&mut self, result: &CheckResult) {
        let marker = match result.status {
            CheckStatus::Pass => self.theme.pass.apply_to(result.status.marker()),
            CheckStatus::Fail => self.theme.fail.apply_to(result.status.marker()),
        };
        let _ = writeln!(self.out, "{} {}", marker, result.description());

        if result.status == CheckStatus::Fail {
            if let Some(hint) = &result.remediation {
                let _ = writeln!(
                    self.out,
                    "{}{} {}",
                    HINT_INDENT,
                    self.theme.hint.apply_to("Fix:"),
                    hint
                );
            }
        }
    }

    /// Flush buffered output so it precedes anything a child process prints.
    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }

    /// Consume the reporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
