//! Visual theme and styling.

use console::Style;

/// Styles applied to the check report.
#[derive(Debug, Clone)]
pub struct PreflightTheme {
    /// Style for the `[PASS]` marker (green).
    pub pass: Style,
    /// Style for the `[FAIL]` marker (red bold).
    pub fail: Style,
    /// Style for the `Fix:` label (yellow).
    pub hint: Style,
}

impl Default for PreflightTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflightTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            pass: Style::new().green(),
            fail: Style::new().red().bold(),
            hint: Style::new().yellow(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            pass: Style::new(),
            fail: Style::new(),
            hint: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect(no_color: bool) -> Self {
        if !no_color && should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }
}

/// Check if colors should be used.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
