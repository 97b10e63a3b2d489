//! CLI argument definitions.
//!
//! Only a handful of options belong to `preflight` itself. Everything else,
//! including unknown flags such as `--verbose`, is collected into
//! [`Cli::args`] and handed to the diagnostic routine untouched. Use `--` to
//! forward a flag that `preflight` would otherwise claim.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::Overrides;

/// Check the Python environment, then run the MCP server health check.
#[derive(Debug, Parser)]
#[command(name = "preflight")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default .preflight.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Interpreter names to try, most preferred first (comma-separated)
    #[arg(
        long = "interpreter",
        value_name = "NAMES",
        value_delimiter = ',',
        env = "PREFLIGHT_INTERPRETERS"
    )]
    pub interpreters: Option<Vec<String>>,

    /// Minimum accepted interpreter version (major.minor)
    #[arg(long, value_name = "VERSION", env = "PREFLIGHT_MIN_VERSION")]
    pub min_version: Option<String>,

    /// Diagnostic routine to run once all checks pass
    #[arg(long, value_name = "PATH", env = "PREFLIGHT_DIAGNOSTIC")]
    pub diagnostic: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Arguments forwarded to the diagnostic routine
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            interpreters: self.interpreters.clone(),
            min_version: self.min_version.clone(),
            diagnostic: self.diagnostic.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments() {
        let cli = Cli::try_parse_from(["preflight"]).unwrap();
        assert!(cli.args.is_empty());
        assert!(!cli.debug);
    }

    #[test]
    fn unknown_flag_is_forwarded() {
        let cli = Cli::try_parse_from(["preflight", "--verbose"]).unwrap();
        assert_eq!(cli.args, vec!["--verbose"]);
    }

    #[test]
    fn everything_after_first_passthrough_is_forwarded() {
        let cli = Cli::try_parse_from(["preflight", "--verbose", "--debug", "x"]).unwrap();
        assert_eq!(cli.args, vec!["--verbose", "--debug", "x"]);
        assert!(!cli.debug);
    }

    #[test]
    fn own_flags_before_passthrough() {
        let cli = Cli::try_parse_from(["preflight", "--debug", "--no-color", "-v"]).unwrap();
        assert!(cli.debug);
        assert!(cli.no_color);
        assert_eq!(cli.args, vec!["-v"]);
    }

    #[test]
    fn double_dash_forwards_own_flags() {
        let cli = Cli::try_parse_from(["preflight", "--", "--debug"]).unwrap();
        assert!(!cli.debug);
        assert_eq!(cli.args, vec!["--debug"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_argument_is_accepted() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![0xff, b'x']);
        let cli = Cli::try_parse_from([OsString::from("preflight"), raw.clone()]).unwrap();
        assert_eq!(cli.args, vec![raw]);
    }

    #[test]
    fn interpreter_list_splits_on_commas() {
        let cli =
            Cli::try_parse_from(["preflight", "--interpreter", "python3.12,python3"]).unwrap();
        assert_eq!(
            cli.overrides().interpreters,
            Some(vec!["python3.12".to_string(), "python3".to_string()])
        );
    }

    #[test]
    fn min_version_flag() {
        let cli = Cli::try_parse_from(["preflight", "--min-version", "3.12"]).unwrap();
        assert_eq!(cli.overrides().min_version.as_deref(), Some("3.12"));
    }
}
